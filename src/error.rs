//! Error types for rs-spellbook.
//!
//! This module defines the error types returned by the pipeline. Structural
//! violations of the expected document shape are fatal for the whole batch.

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Entry markup could not be turned into a document tree.
    #[error("Markup parsing failed: {0}")]
    Parse(String),

    /// The document tree does not have the shape the extractor relies on.
    #[error("Unexpected document structure: {0}")]
    Structure(String),

    /// Rarity value outside of common/uncommon/rare.
    #[error("Unknown rarity: {0}")]
    UnknownRarity(String),

    /// A record file is missing its metadata block or document boundary.
    #[error("Malformed record file {path}: {reason}")]
    RecordFormat {
        /// Path of the offending file.
        path: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Filesystem failure while reading the cache or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache or catalog JSON could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record metadata block could not be (de)serialized.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Search endpoint is not a valid URL.
    #[error("Invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),

    /// Search service request failed.
    #[error("Retrieval failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
