use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::{EnumIter, IntoEnumIterator};

/// Canonical 10-K sections the pipeline extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum SectionId {
    #[serde(rename = "ITEM_1")]
    Item1,
    #[serde(rename = "ITEM_1A")]
    Item1A,
    #[serde(rename = "ITEM_7")]
    Item7,
    #[serde(rename = "ITEM_7A")]
    Item7A,
    #[serde(rename = "ITEM_8")]
    Item8,
    #[serde(rename = "OTHER")]
    Other,
}

/// Item designators in the order Form 10-K lays them out.
pub const ITEM_ORDER: &[&str] = &[
    "1", "1a", "1b", "1c", "2", "3", "4", "5", "6", "7", "7a", "8", "9", "9a", "9b", "9c", "10",
    "11", "12", "13", "14", "15", "16",
];

pub static DEFAULT_TARGET_SECTIONS: Lazy<Vec<SectionId>> = Lazy::new(|| {
    SectionId::iter()
        .filter(|s| !matches!(s, SectionId::Other))
        .collect()
});

impl SectionId {
    /// Maps a lowercase item designator ("1a", "7") to its section.
    ///
    /// Returns `None` for items that are not extraction targets.
    pub fn from_designator(designator: &str) -> Option<SectionId> {
        match designator {
            "1" => Some(SectionId::Item1),
            "1a" => Some(SectionId::Item1A),
            "7" => Some(SectionId::Item7),
            "7a" => Some(SectionId::Item7A),
            "8" => Some(SectionId::Item8),
            _ => None,
        }
    }

    pub fn designator(&self) -> Option<&'static str> {
        match self {
            SectionId::Item1 => Some("1"),
            SectionId::Item1A => Some("1a"),
            SectionId::Item7 => Some("7"),
            SectionId::Item7A => Some("7a"),
            SectionId::Item8 => Some("8"),
            SectionId::Other => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Item1 => "ITEM_1",
            SectionId::Item1A => "ITEM_1A",
            SectionId::Item7 => "ITEM_7",
            SectionId::Item7A => "ITEM_7A",
            SectionId::Item8 => "ITEM_8",
            SectionId::Other => "OTHER",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = String;

    /// Accepts either a designator ("1A") or the serialized name ("ITEM_1A").
    fn from_str(s: &str) -> Result<SectionId, String> {
        let normalized = s.trim().to_lowercase();
        let designator = normalized
            .strip_prefix("item_")
            .or_else(|| normalized.strip_prefix("item "))
            .unwrap_or(&normalized);
        if designator == "other" {
            return Ok(SectionId::Other);
        }
        SectionId::from_designator(designator)
            .ok_or_else(|| format!("Unknown 10-K section: {}", s))
    }
}

/// Position of a designator within `ITEM_ORDER`.
pub fn canonical_index(designator: &str) -> Option<usize> {
    ITEM_ORDER.iter().position(|item| *item == designator)
}
