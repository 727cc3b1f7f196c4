//! Entry parsing pipeline.
//!
//! Raw markup goes through the document builder, the sanitizer, header field
//! extraction, parameter collapsing and finally the formatter. The record
//! metadata is assembled from the entry's own fields alongside.

use crate::document::{build_document, format_document, sanitize, Document};
use crate::entry::RawEntry;
use crate::error::Result;
use crate::fields::{collapse_parameters, extract_header_fields, FieldRules, HeaderField};
use crate::metadata::{self, lookup_source};
use crate::result::CanonicalRecord;

/// Canonical description of an entry and the header fields read from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    /// Canonical description markup.
    pub text: String,
    /// Header fields in document order, including removed ones.
    pub fields: Vec<HeaderField>,
}

/// Parse one entry into a record.
///
/// Returns `Ok(None)` when the entry's primary source is not a recognized
/// source book.
///
/// # Errors
///
/// Fails on structural violations of the header layout, which are fatal for
/// the whole batch.
pub fn parse_entry(entry: &RawEntry, rules: &FieldRules) -> Result<Option<CanonicalRecord>> {
    let Some(book) = entry.primary_source().and_then(lookup_source) else {
        tracing::debug!(
            name = %entry.name,
            source = entry.primary_source().unwrap_or_default(),
            "skipping entry from unrecognized source"
        );
        return Ok(None);
    };

    let traits = metadata::normalize_traits(&entry.traits);
    let description = describe(&entry.markdown, &traits, rules)?;
    let record = metadata::assemble_record(entry, book, description.text, rules);
    Ok(Some(record))
}

/// Build the canonical description of raw markup for an entry with the
/// given (lowercase) traits.
///
/// # Errors
///
/// Returns [`crate::Error::Structure`] when bundled header fields are malformed.
pub fn describe(markup: &str, traits: &[String], rules: &FieldRules) -> Result<Description> {
    let mut doc = prepare(markup)?;
    let fields = extract_header_fields(&mut doc, traits, rules)?;
    let merged = collapse_parameters(&mut doc, rules);
    tracing::trace!(fields = fields.len(), merged, "header processed");
    Ok(Description {
        text: format_document(&mut doc),
        fields,
    })
}

/// Normalize markup without header processing.
///
/// Canonical text is a fixed point: feeding the output back in returns it
/// unchanged.
///
/// # Errors
///
/// Returns [`crate::Error::Parse`] if the markup cannot be rendered.
pub fn canonicalize(markup: &str) -> Result<String> {
    let mut doc = prepare(markup)?;
    Ok(format_document(&mut doc))
}

fn prepare(markup: &str) -> Result<Document> {
    let mut doc = build_document(markup)?;
    sanitize(&mut doc);
    Ok(doc)
}
