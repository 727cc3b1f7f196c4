//! Raw entries as cached from the search service.

use serde::{Deserialize, Deserializer, Serialize};

/// A field the service sends either as a single string or as a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    })
}

/// One cached entry. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    /// Entry name as written upstream.
    pub name: String,

    /// Raw markup body: markdown mixed with HTML and custom tags.
    #[serde(default)]
    pub markdown: String,

    #[serde(default)]
    pub primary_source: Option<String>,

    /// All sources the entry is printed in.
    #[serde(default, deserialize_with = "one_or_many")]
    pub source: Vec<String>,

    /// Action cost text, e.g. `Two Actions`.
    #[serde(default)]
    pub actions: Option<String>,

    /// Numeric action cost; durations show up here as large numbers.
    #[serde(default)]
    pub actions_number: Option<u32>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub rarity: Vec<String>,

    #[serde(default, rename = "trait", deserialize_with = "one_or_many")]
    pub traits: Vec<String>,

    /// Entry type, e.g. `Cantrip`.
    #[serde(default)]
    pub spell_type: Option<String>,

    #[serde(default)]
    pub level: u32,

    /// Externally assigned identifier.
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub tradition: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub domain: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub mystery: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub bloodline: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub lesson: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub patron_theme: Vec<String>,
}

impl RawEntry {
    /// Primary source, falling back to the first listed source.
    #[must_use]
    pub fn primary_source(&self) -> Option<&str> {
        self.primary_source
            .as_deref()
            .or_else(|| self.source.first().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_service_document() {
        let json = r#"{
            "name": "Ray of Frost",
            "markdown": "**Range** 120 feet",
            "source": ["Player Core"],
            "actions": "Two Actions",
            "actions_number": 2,
            "rarity": "common",
            "trait": ["Cantrip", "Cold"],
            "spell_type": "Cantrip",
            "level": 1,
            "tradition": "Arcane",
            "url": "/Spells.aspx?ID=1"
        }"#;
        let entry: RawEntry = serde_json::from_str(json).expect("entry");

        assert_eq!(entry.primary_source(), Some("Player Core"));
        assert_eq!(entry.rarity, vec!["common"]);
        assert_eq!(entry.traits, vec!["Cantrip", "Cold"]);
        assert_eq!(entry.tradition, vec!["Arcane"]);
        assert!(entry.domain.is_empty());
        assert_eq!(entry.actions_number, Some(2));
    }

    #[test]
    fn test_null_list_fields_are_empty() {
        let entry: RawEntry =
            serde_json::from_str(r#"{"name": "X", "rarity": null, "trait": null}"#).expect("entry");
        assert!(entry.rarity.is_empty());
        assert!(entry.traits.is_empty());
        assert_eq!(entry.primary_source(), None);
    }
}
