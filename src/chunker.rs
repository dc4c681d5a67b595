use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::document::{context_prefix, ChunkMetadata, ChunkRecord, ContentType};
use crate::edgar::item::SectionId;
use crate::tokens::{shared_tokenizer, TokenCodec, TokenizerError, TokenizerSource};

pub const DEFAULT_CHUNK_SIZE: usize = 250;
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Proportional page estimate: a 10-K page is roughly four chunks.
const CHUNKS_PER_PAGE: usize = 4;

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Target chunk size in tokens.
    pub chunk_size: usize,
    /// Tokens shared by consecutive chunks.
    pub chunk_overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl ChunkerConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.chunk_size == 0 {
            return Err(ChunkError::Configuration(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(ChunkError::Configuration(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    fn stride(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }
}

/// Splits section text into overlapping, token-bounded chunks.
///
/// Each chunk carries two renderings of the same window: `content_raw` for
/// lexical search and `content_context`, which prefixes the company, fiscal
/// year and section title for the embedding model.
///
/// The chunker holds no mutable state, so one instance can serve several
/// sections concurrently.
#[derive(Clone)]
pub struct SectionChunker {
    config: ChunkerConfig,
    codec: Arc<dyn TokenCodec>,
}

impl SectionChunker {
    /// Builds a chunker over the process-wide tokenizer.
    ///
    /// The configuration is checked before any tokenizer is loaded.
    pub fn new(config: ChunkerConfig, source: &TokenizerSource) -> Result<Self, ChunkError> {
        config.validate()?;
        let codec = shared_tokenizer(source)?;
        Ok(Self { config, codec })
    }

    pub fn with_codec(
        config: ChunkerConfig,
        codec: Arc<dyn TokenCodec>,
    ) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self { config, codec })
    }

    pub fn config(&self) -> ChunkerConfig {
        self.config
    }

    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.config.chunk_overlap
    }

    pub fn count_tokens(&self, text: &str) -> Result<usize, ChunkError> {
        Ok(self.codec.count_tokens(text)?)
    }

    /// Chunks one section. Blank text yields no chunks.
    ///
    /// `chunk_index` and `total_chunks` are local to this section; callers
    /// combining sections renumber them afterwards.
    pub fn chunk_section(
        &self,
        text: &str,
        section: SectionId,
        section_title: &str,
        company_name: &str,
        cik: &str,
        fiscal_year: i32,
    ) -> Result<Vec<ChunkRecord>, ChunkError> {
        let text = text.trim();
        if text.is_empty() {
            log::warn!("Empty text for {}, skipping", section);
            return Ok(Vec::new());
        }

        let windows = self.split_tokens(text)?;
        let total_chunks = windows.len();
        let prefix = context_prefix(company_name, fiscal_year, section_title);

        let chunks: Vec<ChunkRecord> = windows
            .into_iter()
            .enumerate()
            .map(|(idx, content_raw)| {
                let metadata = ChunkMetadata {
                    company: company_name.to_string(),
                    cik: cik.to_string(),
                    fiscal_year,
                    section,
                    section_title: section_title.to_string(),
                    chunk_index: idx,
                    total_chunks,
                    approximate_page: estimate_page(idx, total_chunks),
                };
                ChunkRecord {
                    section,
                    section_title: section_title.to_string(),
                    content_type: ContentType::Text,
                    content_context: format!("{}\n\n{}", prefix, content_raw),
                    content_raw,
                    chunk_index: idx,
                    metadata: metadata.into(),
                }
            })
            .collect();

        log::info!(
            "Chunked {} into {} chunks (~{} tokens each, {} overlap)",
            section,
            total_chunks,
            self.config.chunk_size,
            self.config.chunk_overlap
        );
        Ok(chunks)
    }

    /// Slides a `chunk_size` window over the tokens with `chunk_size - chunk_overlap`
    /// stride, decoding each window back to trimmed text.
    fn split_tokens(&self, text: &str) -> Result<Vec<String>, ChunkError> {
        let tokens = self.codec.encode(text)?;
        let total_tokens = tokens.len();

        if total_tokens <= self.config.chunk_size {
            return Ok(vec![text.to_string()]);
        }

        let step = self.config.stride();
        let mut windows = Vec::new();
        let mut start = 0;
        while start < total_tokens {
            let end = (start + self.config.chunk_size).min(total_tokens);
            let window = self.codec.decode(&tokens[start..end])?;
            windows.push(window.trim().to_string());
            if end >= total_tokens {
                break;
            }
            start += step;
        }

        Ok(windows)
    }
}

/// 1-based page estimate for chunk `index` of `total`, capped at the last page.
pub fn estimate_page(index: usize, total: usize) -> usize {
    let total_pages = total.div_ceil(CHUNKS_PER_PAGE).max(1);
    (index + 1).div_ceil(CHUNKS_PER_PAGE).min(total_pages)
}
