use rs_spellbook::metadata::action_annotation;
use rs_spellbook::{parse_entry, FieldRules, Rarity, RawEntry};

fn entry(name: &str, source: &str) -> RawEntry {
    RawEntry {
        name: name.to_string(),
        markdown: "Body.".to_string(),
        source: vec![source.to_string()],
        level: 1,
        ..RawEntry::default()
    }
}

/// Rarity stated in the rarity field is removed from the traits
#[test]
fn rare_rarity_leaves_other_traits_sorted() {
    let raw = RawEntry {
        rarity: vec!["rare".to_string()],
        traits: vec!["rare".to_string(), "fire".to_string()],
        ..entry("Meteor Swarm", "Player Core")
    };
    let record = parse_entry(&raw, &FieldRules::default())
        .expect("parse")
        .expect("record");

    assert_eq!(record.rarity, Rarity::Rare);
    assert_eq!(record.traits, vec!["fire"]);
}

/// A rarity outside the known three does not stop the entry from parsing
#[test]
fn unrecognized_rarity_uses_traits() {
    let raw = RawEntry {
        rarity: vec!["Unique".to_string()],
        traits: vec!["Uncommon".to_string(), "Mental".to_string()],
        ..entry("Dominate", "Player Core")
    };
    let record = parse_entry(&raw, &FieldRules::default())
        .expect("parse")
        .expect("record");

    assert_eq!(record.rarity, Rarity::Uncommon);
    assert_eq!(record.traits, vec!["mental"]);
}

/// Action costs are annotated only below the count threshold
#[test]
fn action_count_threshold() {
    assert_eq!(action_annotation(Some("Cast a Single Action"), Some(1)), "[one-action]");
    assert_eq!(action_annotation(Some("Cast a Single Action"), Some(9)), "");

    let raw = RawEntry {
        actions: Some("1 minute".to_string()),
        actions_number: Some(60),
        ..entry("Ritual Spell", "Player Core")
    };
    let record = parse_entry(&raw, &FieldRules::default())
        .expect("parse")
        .expect("record");
    assert_eq!(record.actions, "");
}

/// The identifier is an ASCII slug of the title-cased name
#[test]
fn identifier_from_title() {
    let raw = entry("ÉTHER's  CALL of the deep", "Player Core 2");
    let record = parse_entry(&raw, &FieldRules::default())
        .expect("parse")
        .expect("record");

    assert_eq!(record.title, "Éther's  Call of the Deep");
    assert_eq!(record.id, "ethers__call_of_the_deep");
    assert_eq!(record.source, "Pathfinder Player Core 2");
    assert_eq!(record.copyright, "2024 Paizo Inc.");
}

/// Edition flags follow the source book table
#[test]
fn edition_flags_from_source() {
    let rules = FieldRules::default();
    let legacy = parse_entry(&entry("Light", "Core Rulebook"), &rules)
        .expect("parse")
        .expect("record");
    let both = parse_entry(&entry("Light", "Rage of Elements"), &rules)
        .expect("parse")
        .expect("record");

    assert!(legacy.legacy && !legacy.remaster);
    assert!(both.legacy && both.remaster);
}

/// Entries from books outside the table produce no record
#[test]
fn unknown_source_is_skipped() {
    let record = parse_entry(&entry("Light", "Pathfinder Society Guide"), &FieldRules::default())
        .expect("parse");
    assert!(record.is_none());
}

/// Category lists come from the entry fields, not from the text
#[test]
fn categories_come_from_entry_fields() {
    let raw = RawEntry {
        markdown: "**Traditions** occult\n\n---\n\nBody.".to_string(),
        tradition: vec!["Divine".to_string(), "Occult".to_string()],
        bloodline: vec!["Fey".to_string(), "Mythic Dragon".to_string()],
        ..entry("Charm", "Player Core")
    };
    let record = parse_entry(&raw, &FieldRules::default())
        .expect("parse")
        .expect("record");

    assert_eq!(record.traditions, vec!["divine", "occult"]);
    assert_eq!(record.bloodlines, vec!["fey"]);
    assert!(record.description.contains("<strong>Traditions</strong> occult</p>"));
}
