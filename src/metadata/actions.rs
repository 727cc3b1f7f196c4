//! Action cost annotations.
//!
//! Entries describe their casting cost in words ("Single Action",
//! "Two Actions to Three Actions"). The site renders costs as glyphs, keyed by
//! bracketed annotations such as `[one-action]`.

use regex::Regex;
use std::sync::LazyLock;

use crate::document::tags::{ACTION_JOINERS, ACTION_SUBSTITUTIONS};

/// Action counts at or above this value are durations rather than costs
/// and get no annotation.
pub const ACTION_COUNT_LIMIT: u32 = 7;

/// Any cost phrase or joining word, as a whole word.
#[allow(clippy::expect_used)]
static ACTION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = ACTION_SUBSTITUTIONS
        .iter()
        .map(|(phrase, _)| regex::escape(phrase))
        .chain(ACTION_JOINERS.iter().map(|j| regex::escape(j)))
        .collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))).expect("valid regex")
});

fn substitution(token: &str) -> Option<&'static str> {
    ACTION_SUBSTITUTIONS
        .iter()
        .find(|(phrase, _)| phrase.eq_ignore_ascii_case(token))
        .map(|(_, annotation)| *annotation)
}

fn joiner(token: &str) -> Option<&'static str> {
    ACTION_JOINERS
        .iter()
        .find(|j| j.eq_ignore_ascii_case(token))
        .copied()
}

/// Replace cost phrases in `text` by their annotations.
///
/// When at least one phrase is recognized the result holds only the
/// annotations, joined by the `to`/`or` words found between them. Otherwise
/// the text is returned trimmed.
///
/// ```
/// use rs_spellbook::metadata::actions::annotate_actions;
///
/// assert_eq!(annotate_actions("Single Action to Three Actions"), "[one-action] to [three-actions]");
/// assert_eq!(annotate_actions(" 1 minute "), "1 minute");
/// ```
#[must_use]
pub fn annotate_actions(text: &str) -> String {
    let mut parts: Vec<&'static str> = Vec::new();
    let mut pending_joiner: Option<&'static str> = None;

    for token in ACTION_TOKEN.find_iter(text) {
        if let Some(annotation) = substitution(token.as_str()) {
            if let Some(j) = pending_joiner.take() {
                parts.push(j);
            }
            parts.push(annotation);
        } else if !parts.is_empty() {
            // Only a joiner between two annotations is kept.
            pending_joiner = joiner(token.as_str());
        }
    }

    if parts.is_empty() {
        return text.trim().to_string();
    }
    parts.join(" ")
}

/// Annotation for an entry's action text and count.
///
/// Empty when there is no action text or the count reaches
/// [`ACTION_COUNT_LIMIT`].
#[must_use]
pub fn action_annotation(actions: Option<&str>, count: Option<u32>) -> String {
    if count.is_some_and(|n| n >= ACTION_COUNT_LIMIT) {
        return String::new();
    }
    actions.map(annotate_actions).unwrap_or_default()
}
