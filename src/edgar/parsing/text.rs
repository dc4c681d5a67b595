use once_cell::sync::Lazy;
use regex::Regex;

static TOC_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*Table\s+of\s+Contents\s*$").expect("valid regex"));
static PAGE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\d+\s*$").expect("valid regex"));
static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static TRAILING_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").expect("valid regex"));

/// Pattern for running page footers such as `Apple Inc. | 2024 Form 10-K | 17`.
///
/// `None` when either the company name or the fiscal year is unknown.
pub fn footer_pattern(company_name: &str, fiscal_year: i32) -> Result<Option<Regex>, regex::Error> {
    if company_name.is_empty() || fiscal_year == 0 {
        return Ok(None);
    }
    let pattern = format!(
        r"{}\s*\|\s*{}\s+Form\s+10-K\s*\|\s*\d+",
        regex::escape(company_name),
        fiscal_year
    );
    Regex::new(&pattern).map(Some)
}

/// Strips boilerplate from a section's flattened text.
///
/// Steps run in a fixed order: footers, "Table of Contents" lines,
/// non-breaking spaces, bare page numbers, then whitespace collapsing.
pub fn clean_section_text(
    text: &str,
    company_name: &str,
    fiscal_year: i32,
) -> Result<String, regex::Error> {
    let mut text = text.to_string();

    if let Some(footer) = footer_pattern(company_name, fiscal_year)? {
        text = footer.replace_all(&text, "").into_owned();
    }

    text = TOC_LINE_RE.replace_all(&text, "").into_owned();
    text = text.replace('\u{a0}', " ");
    text = PAGE_NUMBER_RE.replace_all(&text, "").into_owned();

    text = BLANK_RUN_RE.replace_all(&text, "\n\n").into_owned();
    text = TRAILING_WS_RE.replace_all(&text, "\n").into_owned();

    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_removed_when_company_and_year_known() {
        let text = "Revenue grew.\nTest Corp | 2024 Form 10-K | 7\nMargins held.";
        let cleaned = clean_section_text(text, "Test Corp", 2024).unwrap();
        assert!(!cleaned.contains("Form 10-K"));
        assert!(cleaned.contains("Revenue grew."));
        assert!(cleaned.contains("Margins held."));
    }

    #[test]
    fn test_footer_kept_without_company_or_year() {
        let text = "Test Corp | 2024 Form 10-K | 7";
        assert_eq!(clean_section_text(text, "", 2024).unwrap(), text);
        assert_eq!(clean_section_text(text, "Test Corp", 0).unwrap(), text);
    }

    #[test]
    fn test_company_name_is_literal() {
        let text = "AT&T Inc. (Parent) | 2023 Form 10-K | 12\nBody.";
        let cleaned = clean_section_text(text, "AT&T Inc. (Parent)", 2023).unwrap();
        assert_eq!(cleaned, "Body.");
        // An unescaped "." would have matched any character here.
        let other = "AT&T Incx (Parent) | 2023 Form 10-K | 12";
        assert_eq!(clean_section_text(other, "AT&T Inc. (Parent)", 2023).unwrap(), other);
    }

    #[test]
    fn test_toc_lines_and_page_numbers_removed() {
        let text = "Intro paragraph.\n  table of CONTENTS  \n42\nNext paragraph 2024.";
        let cleaned = clean_section_text(text, "", 0).unwrap();
        assert!(!cleaned.to_lowercase().contains("table of contents"));
        assert!(!cleaned.lines().any(|l| l.trim() == "42"));
        assert!(cleaned.contains("Next paragraph 2024."));
    }

    #[test]
    fn test_toc_phrase_inside_sentence_kept() {
        let text = "See the Table of Contents for details.";
        assert_eq!(clean_section_text(text, "", 0).unwrap(), text);
    }

    #[test]
    fn test_nbsp_and_whitespace_normalized() {
        let text = "\n\nItem\u{a0}text   \n\n\n\n\nMore text\t\nEnd\n\n";
        let cleaned = clean_section_text(text, "", 0).unwrap();
        assert_eq!(cleaned, "Item text\n\nMore text\nEnd");
    }
}
