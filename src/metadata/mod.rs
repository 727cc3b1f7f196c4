//! Record metadata.
//!
//! Builds the structured part of a [`CanonicalRecord`] from a raw entry's own
//! fields: identifier, title, action annotation, rarity, traits, category
//! lists and source book details. Category lists come from the entry fields,
//! never from the description text.

pub mod actions;
pub mod identifier;
pub mod sources;

use crate::entry::RawEntry;
use crate::fields::{Category, FieldRules};
use crate::result::{CanonicalRecord, Rarity};

pub use actions::{action_annotation, annotate_actions, ACTION_COUNT_LIMIT};
pub use identifier::{book_slug, entry_id, slugify, title_case};
pub use sources::{lookup_source, Edition, SourceBook, SOURCE_BOOKS};

/// Entry type used when the entry does not state one.
pub const DEFAULT_ENTRY_TYPE: &str = "spell";

/// Assemble the record for an entry from a recognized source book.
#[must_use]
pub fn assemble_record(
    entry: &RawEntry,
    book: &SourceBook,
    description: String,
    rules: &FieldRules,
) -> CanonicalRecord {
    let title = title_case(&entry.name);
    let mut traits = normalize_traits(&entry.traits);
    let rarity = read_rarity(&entry.rarity, &mut traits);

    let mut record = CanonicalRecord {
        id: entry_id(&title, entry.slug.as_deref()),
        title,
        actions: action_annotation(entry.actions.as_deref(), entry.actions_number),
        entry_type: entry
            .spell_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map_or_else(|| DEFAULT_ENTRY_TYPE.to_string(), str::to_lowercase),
        level: entry.level,
        rarity,
        traits,
        source: book.display_name(),
        copyright: book.copyright.to_string(),
        legacy: book.edition.is_legacy(),
        remaster: book.edition.is_remaster(),
        description,
        ..CanonicalRecord::default()
    };

    for category in Category::ALL {
        let values = rules.normalize_values(
            category.slug(),
            category_values(entry, category).iter().map(String::as_str),
        );
        *category_field(&mut record, category) = values;
    }

    record
}

/// Lowercase, trim, sort and deduplicate traits.
#[must_use]
pub fn normalize_traits(traits: &[String]) -> Vec<String> {
    let mut out: Vec<String> = traits
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Read the rarity and remove rarity words from `traits`.
///
/// The first non-empty rarity value wins when it names a known rarity.
/// Otherwise a rarity word among the traits decides, `rare` over `uncommon`.
fn read_rarity(values: &[String], traits: &mut Vec<String>) -> Rarity {
    let stated = values
        .iter()
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .and_then(|v| match v.parse::<Rarity>() {
            Ok(rarity) => Some(rarity),
            Err(_) => {
                tracing::debug!(rarity = v, "unrecognized rarity, reading traits instead");
                None
            }
        });

    let rarity = stated.unwrap_or_else(|| {
        if traits.iter().any(|t| t == Rarity::Rare.as_str()) {
            Rarity::Rare
        } else if traits.iter().any(|t| t == Rarity::Uncommon.as_str()) {
            Rarity::Uncommon
        } else {
            Rarity::Common
        }
    });

    traits.retain(|t| t.parse::<Rarity>().is_err());
    rarity
}

fn category_values(entry: &RawEntry, category: Category) -> &[String] {
    match category {
        Category::Tradition => &entry.tradition,
        Category::Domain => &entry.domain,
        Category::Mystery => &entry.mystery,
        Category::Bloodline => &entry.bloodline,
        Category::Lesson => &entry.lesson,
        Category::Patron => &entry.patron_theme,
    }
}

fn category_field(record: &mut CanonicalRecord, category: Category) -> &mut Vec<String> {
    match category {
        Category::Tradition => &mut record.traditions,
        Category::Domain => &mut record.domains,
        Category::Mystery => &mut record.mysteries,
        Category::Bloodline => &mut record.bloodlines,
        Category::Lesson => &mut record.lessons,
        Category::Patron => &mut record.patrons,
    }
}
