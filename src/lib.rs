pub mod chunker;
pub mod core;
pub mod document;
pub mod edgar;
pub mod pipeline;
pub mod storage;
pub mod tokens;

// Re-exports
pub use chunker::{ChunkError, ChunkerConfig, SectionChunker};
pub use document::{ChunkRecord, ContentType};
pub use edgar::{FilingParser, ParseError, ParsedFiling, SectionId};
pub use pipeline::{chunk_filing, reindex_chunks, FilingFacts, PipelineError};
pub use tokens::TokenCodec;
