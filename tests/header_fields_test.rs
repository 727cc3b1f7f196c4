use rs_spellbook::fields::FieldRules;
use rs_spellbook::{describe, Error};

fn witch() -> Vec<String> {
    vec!["witch".to_string()]
}

/// Header scanning stops at the first paragraph that is not a field
#[test]
fn scan_stops_at_first_body_block() {
    let markup = "**Range** 30 feet\n\n**Duration** 1 minute\n\nThe body.\n\n**Area** 10-foot burst";
    let description = describe(markup, &[], &FieldRules::default()).expect("describe");

    let slugs: Vec<&str> = description.fields.iter().map(|f| f.slug.as_str()).collect();
    assert_eq!(slugs, vec!["range", "duration"]);
    assert_eq!(
        description.text,
        "<p class=\"hanging-indent range\"><strong>Range</strong> 30 feet</p>\n\
<p class=\"hanging-indent duration\"><strong>Duration</strong> 1 minute</p>\n\
<p>The body.</p>\n\
<p class=\"hanging-indent\"><strong>Area</strong> 10-foot burst</p>\n"
    );
}

/// Two fields written into one paragraph become two paragraphs, left to right
#[test]
fn bundled_source_and_tradition_split() {
    let markup = "<p><strong>Source</strong> Core Rulebook pg. 12<strong>Tradition</strong> Arcane, Divine</p>";
    let description = describe(markup, &[], &FieldRules::default()).expect("describe");

    let slugs: Vec<&str> = description.fields.iter().map(|f| f.slug.as_str()).collect();
    assert_eq!(slugs, vec!["source", "traditions"]);
    assert_eq!(description.fields[0].value, "Core Rulebook pg. 12");
    assert_eq!(
        description.text,
        "<p class=\"hanging-indent traditions\"><strong>Traditions</strong> arcane, divine</p>\n"
    );
}

/// Splitting does not depend on how many fields are bundled
#[test]
fn three_bundled_fields_split_in_order() {
    let markup = "<p><strong>Range</strong> 30 feet; <strong>Targets</strong> 1 creature; <strong>Duration</strong> 1 minute</p>";
    let description = describe(markup, &[], &FieldRules::default()).expect("describe");

    let slugs: Vec<&str> = description.fields.iter().map(|f| f.slug.as_str()).collect();
    assert_eq!(slugs, vec!["range", "targets", "duration"]);
    assert_eq!(
        description.text,
        "<p class=\"hanging-indent range\"><strong>Range</strong> 30 feet; <strong>Targets</strong> 1 creature</p>\n\
<p class=\"hanging-indent duration\"><strong>Duration</strong> 1 minute</p>\n"
    );
}

/// A domain field never shows up for an entry without the cleric trait
#[test]
fn domain_requires_cleric_trait() {
    let rules = FieldRules::default();
    let markup = "**Domain** fire, sun\n\n**Range** touch";

    let hidden = describe(markup, &witch(), &rules).expect("describe");
    assert!(!hidden.text.contains("Domain"));
    assert!(hidden.text.contains("<strong>Range</strong> touch"));
    assert_eq!(hidden.fields[0].gate.as_deref(), Some("cleric"));

    let shown = describe(markup, &["cleric".to_string()], &rules).expect("describe");
    assert!(shown.text.contains("<strong>Domain</strong> fire, sun"));
}

/// Patron themes keep their capitalization and are filtered to known patrons
#[test]
fn patron_theme_is_renamed_and_filtered() {
    let markup = "**Patron Theme** Wilding Steward, Mystery Patron, Faith's Flamekeeper";
    let description = describe(markup, &witch(), &FieldRules::default()).expect("describe");

    assert_eq!(
        description.text,
        "<p class=\"hanging-indent patron\"><strong>Patron</strong> Faith's Flamekeeper, Wilding Steward</p>\n"
    );
}

/// Saving throws are relabelled and merged with the duration
#[test]
fn saving_throw_merges_with_duration() {
    let markup = "**Saving Throw** Will\n\n**Duration** 1 round\n\n---\n\nYou frighten the target.";
    let description = describe(markup, &[], &FieldRules::default()).expect("describe");

    assert_eq!(
        description.text,
        "<p class=\"hanging-indent defense\"><strong>Defense</strong> Will; <strong>Duration</strong> 1 round</p>\n\
<hr/>\n\
<p>You frighten the target.</p>\n"
    );
}

/// A body paragraph classed in the source is never merged into the header
#[test]
fn source_classed_body_is_not_collapsed() {
    let markup = "**Range** 30 feet\n\n---\n\n<p class=\"area\">Body text, not a field.</p>";
    let description = describe(markup, &[], &FieldRules::default()).expect("describe");

    assert_eq!(
        description.text,
        "<p class=\"hanging-indent range\"><strong>Range</strong> 30 feet</p>\n\
<hr/>\n\
<p>Body text, not a field.</p>\n"
    );
}

/// A header made only of hidden fields leaves a leading rule, which is dropped
#[test]
fn leading_rule_after_hidden_header_is_dropped() {
    let markup = "**Source** Player Core pg. 300\n\n**Spell Lists** arcane\n\n---\n\nBody text.";
    let description = describe(markup, &[], &FieldRules::default()).expect("describe");

    assert_eq!(description.fields.len(), 2);
    assert_eq!(description.text, "<p>Body text.</p>\n");
}

/// A second label with no value text is a structural error
#[test]
fn bundled_label_without_value_fails() {
    let markup = "<p><strong>Range</strong> 30 feet; <strong>Targets</strong><em>one</em></p>";
    let result = describe(markup, &[], &FieldRules::default());
    assert!(matches!(result, Err(Error::Structure(_))));
}

/// Custom rule sets can be passed in alongside the defaults
#[test]
fn custom_rules_hide_extra_labels() {
    let mut rules = FieldRules::default();
    rules.hidden.insert("range".to_string());

    let description = describe("**Range** 30 feet\n\n**Area** 5-foot burst", &[], &rules)
        .expect("describe");
    assert_eq!(
        description.text,
        "<p class=\"hanging-indent area\"><strong>Area</strong> 5-foot burst</p>\n"
    );
}
