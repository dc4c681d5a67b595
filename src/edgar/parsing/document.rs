use encoding_rs::WINDOWS_1252;
use itertools::Itertools;
use scraper::{ElementRef, Html};
use std::fs;
use std::path::Path;

use super::error::{ParseError, ParseResult};
use super::header::extract_metadata;
use super::section::{
    find_headings_in_text, find_section_headings, flatten_body_text, validate_heading_order,
    DetectedHeading, HeadingAnchor,
};
use super::text::clean_section_text;
use super::types::{FilingMetadata, ParsedFiling, SectionContent, SectionMap};
use crate::edgar::item::{SectionId, DEFAULT_TARGET_SECTIONS};

/// Splits 10-K iXBRL HTML filings into their Item sections.
#[derive(Debug, Clone)]
pub struct FilingParser {
    target_sections: Vec<SectionId>,
}

impl Default for FilingParser {
    fn default() -> Self {
        Self {
            target_sections: DEFAULT_TARGET_SECTIONS.clone(),
        }
    }
}

impl FilingParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_sections(target_sections: Vec<SectionId>) -> Self {
        Self { target_sections }
    }

    pub fn target_sections(&self) -> &[SectionId] {
        &self.target_sections
    }

    pub fn parse_html(&self, html_path: &Path) -> ParseResult<ParsedFiling> {
        if !html_path.exists() {
            return Err(ParseError::NotFound(html_path.to_path_buf()));
        }

        let content = read_filing_text(html_path)?;
        if content.trim().is_empty() {
            return Err(ParseError::Parsing(format!("Empty file: {}", html_path.display())));
        }

        let parsed = self.parse_str(&content)?;
        log::info!(
            "Parsed {} sections from {}",
            parsed.sections.len(),
            html_path.display()
        );
        Ok(parsed)
    }

    /// Parses filing HTML that is already in memory.
    pub fn parse_str(&self, content: &str) -> ParseResult<ParsedFiling> {
        let document = Html::parse_document(content);
        let metadata = extract_metadata(&document);

        let mut flat_text = String::new();
        let mut headings = find_section_headings(&document);
        if headings.is_empty() {
            log::warn!("DOM-based detection found no headings, trying text fallback");
            flat_text = flatten_body_text(&document);
            headings = find_headings_in_text(&flat_text);
        }

        if headings.is_empty() {
            return Err(ParseError::Parsing("No section headings found".to_string()));
        }

        validate_heading_order(&headings);

        let all_sections_found: Vec<String> = headings.iter().map(|h| h.label()).collect();
        log::info!(
            "Detected {} section headings: {}",
            headings.len(),
            all_sections_found.iter().join(", ")
        );

        let sections = self.extract_target_sections(&headings, &flat_text, &metadata)?;

        Ok(ParsedFiling {
            metadata,
            sections,
            all_sections_found,
        })
    }

    fn extract_target_sections(
        &self,
        headings: &[DetectedHeading<'_>],
        flat_text: &str,
        metadata: &FilingMetadata,
    ) -> ParseResult<SectionMap> {
        let mut sections = SectionMap::new();

        for (i, heading) in headings.iter().enumerate() {
            let Some(section) = SectionId::from_designator(&heading.item) else {
                continue;
            };
            if !self.target_sections.contains(&section) {
                continue;
            }

            let next = headings.get(i + 1).map(|h| h.anchor);
            let (html_content, raw_text) = match heading.anchor {
                HeadingAnchor::Block(block) => slice_between_blocks(block, next),
                HeadingAnchor::Text { end, .. } => {
                    (String::new(), slice_text(flat_text, end, next))
                }
            };

            let text_content =
                clean_section_text(&raw_text, &metadata.company_name, metadata.fiscal_year)?;
            if text_content.is_empty() {
                log::warn!(
                    "Empty content for Item {} after cleanup",
                    heading.item.to_uppercase()
                );
                continue;
            }

            log::debug!(
                "Extracted Item {}: {} chars",
                heading.item.to_uppercase(),
                text_content.len()
            );
            sections.insert(SectionContent {
                section,
                title: heading.title.clone(),
                html_content,
                text_content,
            });
        }

        Ok(sections)
    }
}

/// Reads a filing as UTF-8, falling back to windows-1252 (a latin-1 superset).
///
/// The fallback never fails: every byte maps to some character.
pub fn read_filing_text(path: &Path) -> ParseResult<String> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            log::warn!(
                "UTF-8 decode failed for {} ({}), falling back to {}",
                path.display(),
                err.utf8_error(),
                WINDOWS_1252.name()
            );
            let bytes = err.into_bytes();
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(&bytes);
            Ok(text.into_owned())
        }
    }
}

/// Collects the body-level siblings after `block` up to the next heading block.
///
/// Returns the siblings' outer HTML and their text, one sibling per line.
fn slice_between_blocks<'a>(
    block: ElementRef<'a>,
    next: Option<HeadingAnchor<'a>>,
) -> (String, String) {
    let stop = match next {
        Some(HeadingAnchor::Block(next_block)) => Some(next_block.id()),
        _ => None,
    };

    let mut html_parts = Vec::new();
    let mut text_parts = Vec::new();

    for sibling in block.next_siblings() {
        if stop == Some(sibling.id()) {
            break;
        }
        let Some(element) = ElementRef::wrap(sibling) else {
            continue;
        };
        html_parts.push(element.html());
        let text = element
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .join(" ");
        if !text.is_empty() {
            text_parts.push(text);
        }
    }

    (html_parts.join("\n"), text_parts.join("\n"))
}

/// Flattened text between the end of one heading line and the next heading.
fn slice_text(flat_text: &str, from: usize, next: Option<HeadingAnchor<'_>>) -> String {
    let to = match next {
        Some(HeadingAnchor::Text { start, .. }) => start,
        _ => flat_text.len(),
    };
    flat_text.get(from..to).unwrap_or_default().to_string()
}
