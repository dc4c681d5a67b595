pub mod document;
pub mod error;
pub mod header;
pub mod section;
pub mod text;
pub mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use document::{read_filing_text, FilingParser};
pub use error::{ParseError, ParseResult};
pub use types::{FilingMetadata, ParsedFiling, SectionContent, SectionMap};
