//! Header fields of an entry description.
//!
//! The header is the leading run of `Label value` paragraphs (range, area,
//! duration, traditions, ...). [`extract_header_fields`] normalizes those
//! paragraphs in place under a [`FieldRules`] rule set and
//! [`collapse_parameters`] then joins related ones onto a single line.

pub mod collapse;
pub mod extract;
pub mod rules;

pub use collapse::collapse_parameters;
pub use extract::extract_header_fields;
pub use rules::{label_slug, Category, FieldRules};

/// A header field read from an entry description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    /// Canonical label, e.g. `Targets`.
    pub label: String,
    /// Label slug, e.g. `targets` or `spell-lists`.
    pub slug: String,
    /// Normalized value without the leading space; empty when a list value
    /// was filtered down to nothing.
    pub value: String,
    /// Trait an entry needs for this field to be shown.
    pub gate: Option<String>,
}
