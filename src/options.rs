//! Configuration options for a pipeline run.
//!
//! `Options` holds the paths and retrieval settings; the header rule tables
//! live separately in [`crate::fields::FieldRules`].

use std::path::PathBuf;

/// Default search service endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://elasticsearch.aonprd.com/aon/_search";

/// Configuration options for download and parse runs.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_spellbook::Options;
///
/// let options = Options {
///     output_dir: "site/data".into(),
///     ..Options::default()
/// };
/// assert_eq!(options.page_size, 100);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Raw entry cache written by `download` and read by `parse`.
    ///
    /// Default: `scrape/spells.json`
    pub cache_path: PathBuf,

    /// Directory receiving record files and the facet catalog.
    ///
    /// Default: `data`
    pub output_dir: PathBuf,

    /// Search service endpoint.
    ///
    /// Default: [`DEFAULT_ENDPOINT`]
    pub endpoint: String,

    /// Results requested per page.
    ///
    /// Default: `100`
    pub page_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from("scrape").join("spells.json"),
            output_dir: PathBuf::from("data"),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: 100,
        }
    }
}
