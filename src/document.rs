use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::edgar::item::SectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentType {
    Text,
    Table,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContentType::Text => write!(f, "TEXT"),
            ContentType::Table => write!(f, "TABLE"),
        }
    }
}

/// Provenance attached to every chunk, flattened into `ChunkRecord::metadata`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkMetadata {
    pub company: String,
    pub cik: String,
    pub fiscal_year: i32,
    pub section: SectionId,
    pub section_title: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub approximate_page: usize,
}

impl From<ChunkMetadata> for Map<String, Value> {
    fn from(metadata: ChunkMetadata) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("company".to_string(), Value::String(metadata.company));
        map.insert("central_index_key".to_string(), Value::String(metadata.cik));
        map.insert("fiscal_year".to_string(), Value::Number(metadata.fiscal_year.into()));
        map.insert(
            "section".to_string(),
            Value::String(metadata.section.to_string()),
        );
        map.insert(
            "section_title".to_string(),
            Value::String(metadata.section_title),
        );
        map.insert(
            "chunk_index".to_string(),
            Value::Number(metadata.chunk_index.into()),
        );
        map.insert(
            "total_chunks".to_string(),
            Value::Number(metadata.total_chunks.into()),
        );
        map.insert(
            "approximate_page".to_string(),
            Value::Number(metadata.approximate_page.into()),
        );
        map
    }
}

/// A section slice ready for embedding and storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub section: SectionId,
    pub section_title: String,
    pub content_type: ContentType,
    /// Plain text for lexical (BM25) search.
    pub content_raw: String,
    /// `content_raw` behind a `[Company | 10-K FY2024 | Title]` header, for embedding.
    pub content_context: String,
    pub chunk_index: usize,
    pub metadata: Map<String, Value>,
}

impl ChunkRecord {
    /// Moves the chunk to `index` of `total`, keeping `metadata` in step.
    pub fn set_chunks(&mut self, index: usize, total: usize) -> &mut Self {
        self.chunk_index = index;
        self.metadata
            .insert("chunk_index".to_string(), Value::Number(index.into()));
        self.metadata
            .insert("total_chunks".to_string(), Value::Number(total.into()));
        self
    }

    pub fn total_chunks(&self) -> Option<usize> {
        self.metadata
            .get("total_chunks")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
    }
}

/// `[Apple Inc. | 10-K FY2024 | Risk Factors]`
pub fn context_prefix(company_name: &str, fiscal_year: i32, section_title: &str) -> String {
    format!("[{} | 10-K FY{} | {}]", company_name, fiscal_year, section_title)
}
