use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::edgar::item::SectionId;

/// Filing-level facts recovered from the iXBRL `dei:` tags and `<title>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingMetadata {
    pub company_name: String,
    pub cik: String,
    pub fiscal_year: i32,
    pub filing_period: String,
    pub doc_title: String,
}

/// One extracted 10-K section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionContent {
    pub section: SectionId,
    pub title: String,
    /// Raw HTML between this heading and the next, kept for table handling.
    pub html_content: String,
    /// Markup-free text with footers, page numbers and ToC headers removed.
    pub text_content: String,
}

/// Sections keyed by id, in the order they were first extracted.
///
/// Inserting an id that is already present replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    entries: Vec<SectionContent>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, content: SectionContent) -> Option<SectionContent> {
        match self.entries.iter_mut().find(|e| e.section == content.section) {
            Some(existing) => Some(std::mem::replace(existing, content)),
            None => {
                self.entries.push(content);
                None
            }
        }
    }

    pub fn get(&self, section: SectionId) -> Option<&SectionContent> {
        self.entries.iter().find(|e| e.section == section)
    }

    pub fn contains(&self, section: SectionId) -> bool {
        self.get(section).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.entries.iter().map(|e| e.section)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SectionContent> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[SectionContent] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a SectionMap {
    type Item = &'a SectionContent;
    type IntoIter = std::slice::Iter<'a, SectionContent>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for SectionMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.section.as_str(), entry)?;
        }
        map.end()
    }
}

/// Result of parsing one 10-K filing.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedFiling {
    pub metadata: FilingMetadata,
    pub sections: SectionMap,
    /// Every heading detected, target or not, as "Item 1A: Risk Factors".
    pub all_sections_found: Vec<String>,
}
