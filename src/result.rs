//! Result types for parsing output.
//!
//! A [`CanonicalRecord`] is the structured metadata of one entry plus its
//! canonical description text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Rarity of an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// Default rarity.
    #[default]
    Common,
    /// `uncommon`
    Uncommon,
    /// `rare`
    Rare,
}

impl Rarity {
    /// All rarities, most common first.
    pub const ALL: [Rarity; 3] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare];

    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == lower)
            .ok_or_else(|| Error::UnknownRarity(s.to_string()))
    }
}

/// Canonical record built from one raw entry.
///
/// Serializes to the flat metadata mapping of a record file; the description
/// is stored separately as the trailing text block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Slug identifier, unique within a source book.
    pub id: String,

    /// Title-cased display name.
    pub title: String,

    /// Action cost annotation, e.g. `[two-actions]`.
    pub actions: String,

    /// Entry type (`spell`, `cantrip`, `focus`).
    #[serde(rename = "type")]
    pub entry_type: String,

    /// Level, 0 and up.
    pub level: u32,

    /// Rarity.
    pub rarity: Rarity,

    /// Traits, sorted, without rarity words.
    pub traits: Vec<String>,

    pub traditions: Vec<String>,
    pub domains: Vec<String>,
    pub mysteries: Vec<String>,
    pub bloodlines: Vec<String>,
    pub lessons: Vec<String>,
    pub patrons: Vec<String>,

    /// Source book display name, e.g. `Pathfinder Player Core`.
    pub source: String,

    /// Copyright line of the source book.
    pub copyright: String,

    /// Whether the source belongs to the legacy ruleset.
    pub legacy: bool,

    /// Whether the source belongs to the remastered ruleset.
    pub remaster: bool,

    /// Canonical description markup.
    #[serde(skip)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_parse() {
        assert_eq!("Rare".parse::<Rarity>().ok(), Some(Rarity::Rare));
        assert_eq!(" uncommon ".parse::<Rarity>().ok(), Some(Rarity::Uncommon));
        assert!(matches!("unique".parse::<Rarity>(), Err(Error::UnknownRarity(_))));
    }

    #[test]
    fn test_type_field_is_renamed() {
        let record = CanonicalRecord {
            entry_type: "cantrip".to_string(),
            description: "<p>text</p>\n".to_string(),
            ..CanonicalRecord::default()
        };
        let json = serde_json::to_value(&record).expect("json");
        assert_eq!(json["type"], "cantrip");
        assert_eq!(json["rarity"], "common");
        assert!(json.get("description").is_none());
    }
}
