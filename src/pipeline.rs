use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chunker::{ChunkError, SectionChunker};
use crate::document::ChunkRecord;
use crate::edgar::parsing::{FilingMetadata, ParseError, ParsedFiling};
use crate::storage::{ChunkSink, EmbeddedChunk, Embedder};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Chunk(#[from] ChunkError),

    #[error("No chunks produced from filing")]
    NoChunks,

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Storage failed: {0}")]
    Storage(String),
}

/// Company facts stamped onto every chunk of a filing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingFacts {
    pub company_name: String,
    pub cik: String,
    pub fiscal_year: i32,
}

impl FilingFacts {
    pub fn new(company_name: impl Into<String>, cik: impl Into<String>, fiscal_year: i32) -> Self {
        Self {
            company_name: company_name.into(),
            cik: cik.into(),
            fiscal_year,
        }
    }

    pub fn from_metadata(metadata: &FilingMetadata) -> Self {
        Self::new(&metadata.company_name, &metadata.cik, metadata.fiscal_year)
    }

    /// Overrides the fiscal year, e.g. with the value from the EDGAR listing.
    pub fn with_fiscal_year(mut self, fiscal_year: i32) -> Self {
        self.fiscal_year = fiscal_year;
        self
    }
}

/// Renumbers chunks 0..n-1 across the whole slice.
pub fn reindex_chunks(chunks: &mut [ChunkRecord]) {
    let total = chunks.len();
    for (idx, chunk) in chunks.iter_mut().enumerate() {
        chunk.set_chunks(idx, total);
    }
}

/// Chunks every extracted section and numbers the result filing-wide.
///
/// Sections are chunked in parallel; output keeps the filing's section order.
pub fn chunk_filing(
    parsed: &ParsedFiling,
    chunker: &SectionChunker,
    facts: &FilingFacts,
) -> Result<Vec<ChunkRecord>, PipelineError> {
    let per_section = parsed
        .sections
        .as_slice()
        .par_iter()
        .map(|content| {
            chunker.chunk_section(
                &content.text_content,
                content.section,
                &content.title,
                &facts.company_name,
                &facts.cik,
                facts.fiscal_year,
            )
        })
        .collect::<Result<Vec<_>, ChunkError>>()?;

    let mut chunks: Vec<ChunkRecord> = per_section.into_iter().flatten().collect();
    if chunks.is_empty() {
        return Err(PipelineError::NoChunks);
    }

    reindex_chunks(&mut chunks);
    log::info!(
        "Chunked {} sections of {} into {} chunks",
        parsed.sections.len(),
        facts.company_name,
        chunks.len()
    );
    Ok(chunks)
}

/// Embeds each chunk's `content_context` in batches and hands the results to `sink`.
pub fn embed_and_store(
    chunks: Vec<ChunkRecord>,
    embedder: &dyn Embedder,
    sink: &dyn ChunkSink,
) -> Result<usize, PipelineError> {
    if chunks.is_empty() {
        return Err(PipelineError::NoChunks);
    }

    let batch_size = embedder.batch_size().max(1);
    let mut embeddings = Vec::with_capacity(chunks.len());
    for batch in chunks.chunks(batch_size) {
        let texts: Vec<String> = batch.iter().map(|c| c.content_context.clone()).collect();
        let vectors = embedder
            .embed(&texts)
            .map_err(|e| PipelineError::Embedding(format!("{:#}", e)))?;
        if vectors.len() != texts.len() {
            return Err(PipelineError::Embedding(format!(
                "expected {} vectors, got {}",
                texts.len(),
                vectors.len()
            )));
        }
        embeddings.extend(vectors);
    }
    log::debug!("Generated {} embeddings in batches of {}", embeddings.len(), batch_size);

    let embedded: Vec<EmbeddedChunk> = chunks
        .into_iter()
        .zip(embeddings)
        .map(|(record, embedding)| EmbeddedChunk { record, embedding })
        .collect();

    let stored = sink
        .store(embedded)
        .map_err(|e| PipelineError::Storage(format!("{:#}", e)))?;
    log::info!("Embedded and stored {} chunks", stored);
    Ok(stored)
}
