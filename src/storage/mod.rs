use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::document::ChunkRecord;

/// A chunk paired with the vector computed from its `content_context`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    pub record: ChunkRecord,
    pub embedding: Vec<f32>,
}

/// Turns texts into dense vectors, one per input, in input order.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Preferred number of texts per `embed` call.
    fn batch_size(&self) -> usize {
        32
    }
}

/// Destination for embedded chunks.
pub trait ChunkSink {
    /// Persists `chunks`, returning how many were stored.
    fn store(&self, chunks: Vec<EmbeddedChunk>) -> Result<usize>;

    fn count(&self) -> Result<usize>;
}

pub mod memory;

pub use self::memory::InMemoryStore;
