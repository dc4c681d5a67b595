use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Filing not found: {0}")]
    NotFound(PathBuf),

    #[error("{0}")]
    Parsing(String),

    #[error("Failed to read filing: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid cleanup pattern: {0}")]
    Pattern(#[from] regex::Error),
}
