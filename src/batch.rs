//! Batch parsing.
//!
//! Entries are processed strictly in cache order. Any error aborts the whole
//! run; there is no per-entry isolation.

use std::fs;
use std::path::Path;

use crate::catalog::{FacetCatalog, CATALOG_FILE};
use crate::encoding::transcode_to_utf8;
use crate::entry::RawEntry;
use crate::error::Result;
use crate::extract::parse_entry;
use crate::fields::FieldRules;
use crate::options::Options;
use crate::store::{write_record, WriteOutcome};

/// Counts for one parse run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Entries that produced a record.
    pub parsed: usize,
    /// Records written to new files.
    pub written: usize,
    /// Records whose file already existed.
    pub existing: usize,
    /// Entries from unrecognized sources.
    pub skipped: usize,
}

/// Load raw entries from a cache file.
///
/// # Errors
///
/// Returns an I/O or JSON error.
pub fn load_entries(path: &Path) -> Result<Vec<RawEntry>> {
    let bytes = fs::read(path)?;
    let text = transcode_to_utf8(&bytes);
    Ok(serde_json::from_str(&text)?)
}

/// Parse entries, write their records under `output_dir` and collect facets.
///
/// # Errors
///
/// The first parse or write error aborts the batch.
pub fn parse_batch(
    entries: &[RawEntry],
    output_dir: &Path,
    rules: &FieldRules,
) -> Result<(ParseSummary, FacetCatalog)> {
    let mut summary = ParseSummary::default();
    let mut catalog = FacetCatalog::new();

    for entry in entries {
        let Some(record) = parse_entry(entry, rules)? else {
            summary.skipped += 1;
            continue;
        };
        summary.parsed += 1;

        match write_record(output_dir, &record)? {
            WriteOutcome::Written(_) => summary.written += 1,
            WriteOutcome::Exists(_) => summary.existing += 1,
        }
        catalog.observe(&record);
    }

    Ok((summary, catalog))
}

/// Run a full parse: read the cache, write records, write the catalog.
///
/// # Errors
///
/// Returns the first error encountered.
pub fn run_parse(options: &Options, rules: &FieldRules) -> Result<ParseSummary> {
    let entries = load_entries(&options.cache_path)?;
    tracing::info!(
        entries = entries.len(),
        cache = %options.cache_path.display(),
        "parsing cached entries"
    );

    let (summary, catalog) = parse_batch(&entries, &options.output_dir, rules)?;
    catalog.write(&options.output_dir.join(CATALOG_FILE))?;

    tracing::info!(
        parsed = summary.parsed,
        written = summary.written,
        existing = summary.existing,
        skipped = summary.skipped,
        "parse finished"
    );
    Ok(summary)
}
