use anyhow::{anyhow, Result};
use std::sync::RwLock;

use crate::document::ChunkRecord;
use crate::storage::{ChunkSink, EmbeddedChunk};

/// Ephemeral `ChunkSink` with brute-force cosine search.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    chunks: RwLock<Vec<EmbeddedChunk>>,
}

fn cosine_similarity(v1: &[f32], v2: &[f32]) -> f32 {
    let dot_product: f32 = v1.iter().zip(v2.iter()).map(|(a, b)| a * b).sum();
    let norm1: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm2: f32 = v2.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm1 == 0.0 || norm2 == 0.0 {
        return 0.0;
    }
    dot_product / (norm1 * norm2)
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored records in insertion order.
    pub fn records(&self) -> Result<Vec<ChunkRecord>> {
        let chunks = self
            .chunks
            .read()
            .map_err(|_| anyhow!("chunk store lock poisoned"))?;
        Ok(chunks.iter().map(|c| c.record.clone()).collect())
    }

    /// The `limit` records closest to `query`, best first.
    pub fn similarity_search(
        &self,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<(ChunkRecord, f32)>> {
        let chunks = self
            .chunks
            .read()
            .map_err(|_| anyhow!("chunk store lock poisoned"))?;

        let mut scored: Vec<(ChunkRecord, f32)> = chunks
            .iter()
            .map(|c| (c.record.clone(), cosine_similarity(query, &c.embedding)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit);
        Ok(scored)
    }
}

impl ChunkSink for InMemoryStore {
    fn store(&self, chunks: Vec<EmbeddedChunk>) -> Result<usize> {
        let mut stored = self
            .chunks
            .write()
            .map_err(|_| anyhow!("chunk store lock poisoned"))?;
        let added = chunks.len();
        for chunk in &chunks {
            log::debug!(
                "Storing chunk {} of {} ({} dims)",
                chunk.record.chunk_index,
                chunk.record.section,
                chunk.embedding.len()
            );
        }
        stored.extend(chunks);
        Ok(added)
    }

    fn count(&self) -> Result<usize> {
        self.chunks
            .read()
            .map(|chunks| chunks.len())
            .map_err(|_| anyhow!("chunk store lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
