use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

use crate::chunker::{ChunkerConfig, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::edgar::item::{SectionId, DEFAULT_TARGET_SECTIONS};
use crate::tokens::{TokenizerSource, DEFAULT_TOKENIZER_MODEL};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkerSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub target_sections: Vec<SectionId>,
    pub tokenizer_path: Option<PathBuf>,
    pub tokenizer_model: String,
}

impl Default for ChunkerSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            target_sections: DEFAULT_TARGET_SECTIONS.clone(),
            tokenizer_path: None,
            tokenizer_model: DEFAULT_TOKENIZER_MODEL.to_string(),
        }
    }
}

impl ChunkerSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; unset or blank keys take their defaults.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let chunk_size = match lookup("CHUNK_SIZE") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("CHUNK_SIZE is not a number: {:?}", value))?,
            None => defaults.chunk_size,
        };

        let chunk_overlap = match lookup("CHUNK_OVERLAP") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("CHUNK_OVERLAP is not a number: {:?}", value))?,
            None => defaults.chunk_overlap,
        };

        let target_sections = match lookup("PARSING_TARGET_SECTIONS") {
            Some(value) => parse_target_sections(&value)?,
            None => defaults.target_sections,
        };

        let tokenizer_path = lookup("TOKENIZER_PATH").map(PathBuf::from);

        let tokenizer_model = lookup("TOKENIZER_MODEL").unwrap_or(defaults.tokenizer_model);

        Ok(Self {
            chunk_size,
            chunk_overlap,
            target_sections,
            tokenizer_path,
            tokenizer_model,
        })
    }

    pub fn chunker_config(&self) -> ChunkerConfig {
        ChunkerConfig::new(self.chunk_size, self.chunk_overlap)
    }

    /// A configured file wins over the hub model.
    pub fn tokenizer_source(&self) -> TokenizerSource {
        match &self.tokenizer_path {
            Some(path) => TokenizerSource::File(path.clone()),
            None => TokenizerSource::Pretrained(self.tokenizer_model.clone()),
        }
    }
}

/// Parses a comma-separated designator list such as `1,1A,7`.
pub fn parse_target_sections(value: &str) -> Result<Vec<SectionId>> {
    let sections = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<SectionId>().map_err(|e| anyhow!(e)))
        .collect::<Result<Vec<_>>>()
        .context("Invalid PARSING_TARGET_SECTIONS")?;

    if sections.is_empty() {
        return Err(anyhow!("PARSING_TARGET_SECTIONS is empty"));
    }
    Ok(sections)
}
