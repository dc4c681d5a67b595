use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

use crate::edgar::item::{canonical_index, ITEM_ORDER};

/// "Item 7A. Quantitative and Qualitative ..." at the start of a heading span.
static ITEM_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^Item\s+(\d+[A-Za-z]?)[.\s\u{a0}\-\u{2014}:]+(.+)").expect("valid regex")
});

/// Same shape, matched line by line against flattened body text.
static ITEM_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^Item\s+(\d+[A-Za-z]?)[.\s\u{a0}\-\u{2014}:]+(.+)$").expect("valid regex")
});

static BOLD_STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)font-weight\s*:\s*(bold|bolder|[7-9]00)\b").expect("valid regex")
});

static STYLED_SPAN: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span[style]").expect("valid selector"));

/// Where a detected heading sits in the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadingAnchor<'a> {
    /// The direct child of `<body>` that contains the heading.
    Block(ElementRef<'a>),
    /// Byte range of the heading line within the flattened body text.
    Text { start: usize, end: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectedHeading<'a> {
    /// Lowercase designator, e.g. "7a".
    pub item: String,
    pub title: String,
    /// Ordering key: body-child index, or match ordinal for text headings.
    pub position: usize,
    pub anchor: HeadingAnchor<'a>,
}

impl DetectedHeading<'_> {
    /// "Item 7A: Market Risk"
    pub fn label(&self) -> String {
        format!("Item {}: {}", self.item.to_uppercase(), self.title)
    }
}

/// Parses "Item 1A. Risk Factors" into ("1a", "Risk Factors").
pub fn parse_item_heading(text: &str) -> Option<(String, String)> {
    let caps = ITEM_HEADING_RE.captures(text)?;
    let title = caps[2].trim();
    if title.is_empty() {
        return None;
    }
    Some((caps[1].to_lowercase(), title.to_string()))
}

pub fn is_bold_style(style: &str) -> bool {
    BOLD_STYLE_RE.is_match(style)
}

pub fn body(document: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("body").ok()?;
    document.select(&selector).next()
}

fn has_table_ancestor(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().name() == "table")
}

/// Walks up from `element`'s parent to the ancestor whose parent is `body`.
///
/// Returns `None` when the walk reaches the root without meeting `body`.
fn body_level_ancestor<'a>(
    element: ElementRef<'a>,
    body: ElementRef<'a>,
) -> Option<ElementRef<'a>> {
    let mut current = element.parent()?;
    loop {
        let parent = current.parent()?;
        if parent.id() == body.id() {
            return ElementRef::wrap(current);
        }
        current = parent;
    }
}

/// Finds headings rendered as bold `<span>`s outside of tables.
///
/// Table-of-contents rows in EDGAR filings always live inside table cells, so
/// any candidate with a `<table>` ancestor is skipped.
pub fn find_section_headings(document: &Html) -> Vec<DetectedHeading<'_>> {
    let Some(body) = body(document) else {
        return Vec::new();
    };

    let positions: HashMap<_, usize> = body
        .children()
        .filter_map(ElementRef::wrap)
        .enumerate()
        .map(|(i, child)| (child.id(), i))
        .collect();

    let mut headings = Vec::new();
    for span in document.select(&STYLED_SPAN) {
        if !span.value().attr("style").is_some_and(is_bold_style) {
            continue;
        }
        let text = span.text().map(str::trim).collect::<String>();
        let Some((item, title)) = parse_item_heading(&text) else {
            continue;
        };
        if has_table_ancestor(span) {
            log::debug!("Skipping table-of-contents entry: {}", text);
            continue;
        }
        let Some(block) = body_level_ancestor(span, body) else {
            log::debug!("No body-level block for heading: {}", text);
            continue;
        };
        let Some(&position) = positions.get(&block.id()) else {
            continue;
        };

        headings.push(DetectedHeading {
            item,
            title,
            position,
            anchor: HeadingAnchor::Block(block),
        });
    }

    headings.sort_by_key(|h| h.position);
    headings
}

/// Body text with one text node per line, as the fallback strategy sees it.
pub fn flatten_body_text(document: &Html) -> String {
    body(document)
        .map(|body| body.text().collect::<Vec<_>>().join("\n"))
        .unwrap_or_default()
}

/// Fallback for filings without bold heading spans: regex over `flat_text`.
pub fn find_headings_in_text(flat_text: &str) -> Vec<DetectedHeading<'static>> {
    ITEM_LINE_RE
        .captures_iter(flat_text)
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            Some(DetectedHeading {
                item: caps[1].to_lowercase(),
                title: caps[2].trim().to_string(),
                position: i,
                anchor: HeadingAnchor::Text {
                    start: whole.start(),
                    end: whole.end(),
                },
            })
        })
        .collect()
}

/// Logs headings that are unknown or out of canonical 10-K order.
///
/// Returns the number of irregularities; never rejects the filing.
pub fn validate_heading_order(headings: &[DetectedHeading<'_>]) -> usize {
    let mut last: Option<usize> = None;
    let mut irregular = 0;

    for heading in headings {
        let Some(idx) = canonical_index(&heading.item) else {
            log::warn!("Unknown item number: {}", heading.item);
            irregular += 1;
            continue;
        };
        if let Some(prev) = last {
            if idx < prev {
                log::warn!(
                    "Out-of-order heading: Item {} (expected after Item {})",
                    heading.item.to_uppercase(),
                    ITEM_ORDER[prev].to_uppercase()
                );
                irregular += 1;
            }
        }
        last = Some(last.map_or(idx, |prev| prev.max(idx)));
    }

    irregular
}
