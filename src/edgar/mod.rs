pub mod item;
pub mod parsing;

pub use item::SectionId;
pub use parsing::{FilingParser, ParseError, ParsedFiling};
