//! Record files.
//!
//! A record is written to `<output>/<book-slug>/<id>.yaml` as its YAML
//! metadata, a `--- >` boundary line and the description indented by two
//! spaces. Files that already exist are never overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::metadata::book_slug;
use crate::result::CanonicalRecord;

/// Line separating the metadata block from the description block.
pub const DOCUMENT_BOUNDARY: &str = "--- >";

const INDENT: &str = "  ";

/// What [`write_record`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new file was written.
    Written(PathBuf),
    /// The file was already there and was left untouched.
    Exists(PathBuf),
}

/// Path of a record's file under `output_dir`.
#[must_use]
pub fn record_path(output_dir: &Path, record: &CanonicalRecord) -> PathBuf {
    output_dir
        .join(book_slug(&record.source))
        .join(format!("{}.yaml", record.id))
}

/// Render a record as file contents.
///
/// # Errors
///
/// Returns [`Error::Yaml`] if the metadata cannot be serialized.
pub fn render_record(record: &CanonicalRecord) -> Result<String> {
    let metadata = serde_yaml::to_string(record)?;
    let mut out = String::with_capacity(metadata.len() + record.description.len() + 16);
    out.push_str(&metadata);
    out.push('\n');
    out.push_str(DOCUMENT_BOUNDARY);
    out.push('\n');
    for line in record.description.split_inclusive('\n') {
        if !line.trim().is_empty() {
            out.push_str(INDENT);
        }
        out.push_str(line);
    }
    Ok(out)
}

/// Parse file contents back into a record.
///
/// # Errors
///
/// Returns [`Error::RecordFormat`] when the boundary line is missing and
/// [`Error::Yaml`] when the metadata block is invalid.
pub fn parse_record(text: &str, path: &Path) -> Result<CanonicalRecord> {
    let marker = format!("\n{DOCUMENT_BOUNDARY}\n");
    let Some(split) = text.find(&marker) else {
        return Err(Error::RecordFormat {
            path: path.display().to_string(),
            reason: format!("missing {DOCUMENT_BOUNDARY:?} boundary"),
        });
    };

    let mut record: CanonicalRecord = serde_yaml::from_str(&text[..split])?;
    record.description = text[split + marker.len()..]
        .split_inclusive('\n')
        .map(|line| line.strip_prefix(INDENT).unwrap_or(line))
        .collect();
    Ok(record)
}

/// Write a record under `output_dir` unless its file already exists.
///
/// # Errors
///
/// Returns an I/O or YAML error.
pub fn write_record(output_dir: &Path, record: &CanonicalRecord) -> Result<WriteOutcome> {
    let path = record_path(output_dir, record);
    if path.exists() {
        tracing::debug!(path = %path.display(), "record exists, leaving it untouched");
        return Ok(WriteOutcome::Exists(path));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, render_record(record)?)?;
    tracing::debug!(path = %path.display(), "wrote record");
    Ok(WriteOutcome::Written(path))
}

/// Read a record file.
///
/// # Errors
///
/// Returns an I/O, format or YAML error.
pub fn read_record(path: &Path) -> Result<CanonicalRecord> {
    let text = fs::read_to_string(path)?;
    parse_record(&text, path)
}
