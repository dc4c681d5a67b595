use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

use super::types::FilingMetadata;

/// Collects `dei:` facts from inline XBRL tags, keyed by lowercased local name.
///
/// `<ix:nonNumeric name="dei:EntityRegistrantName">Apple Inc.</ix:nonNumeric>`
/// yields `entityregistrantname -> "Apple Inc."`. Later tags win.
pub fn dei_fields(document: &Html) -> HashMap<String, String> {
    let mut fields = HashMap::new();

    for node in document.root_element().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if !element.value().name().starts_with("ix:") {
            continue;
        }
        let Some(name) = element.value().attr("name") else {
            continue;
        };
        if !name.to_lowercase().starts_with("dei:") {
            continue;
        }

        let field_name = name.rsplit(':').next().unwrap_or(name).to_lowercase();
        let value = element.text().map(str::trim).collect::<String>();
        fields.insert(field_name, value);
    }

    fields
}

pub fn document_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|title| title.text().map(str::trim).collect::<String>())
        .unwrap_or_default()
}

/// Builds filing metadata; absent or malformed fields fall back to defaults.
pub fn extract_metadata(document: &Html) -> FilingMetadata {
    let mut fields = dei_fields(document);
    let mut take = |key: &str| fields.remove(key).unwrap_or_default();

    let company_name = take("entityregistrantname");
    let cik = take("entitycentralindexkey");
    let fiscal_year_raw = take("documentfiscalyearfocus");
    let filing_period = take("documentfiscalperiodfocus");

    let fiscal_year = fiscal_year_raw.trim().parse::<i32>().unwrap_or_else(|_| {
        if !fiscal_year_raw.is_empty() {
            log::warn!("Unparseable DocumentFiscalYearFocus: {:?}", fiscal_year_raw);
        }
        0
    });

    let metadata = FilingMetadata {
        company_name,
        cik,
        fiscal_year,
        filing_period,
        doc_title: document_title(document),
    };
    log::info!(
        "Extracted metadata: company={}, cik={}, fy={}",
        metadata.company_name,
        metadata.cik,
        metadata.fiscal_year
    );
    metadata
}
