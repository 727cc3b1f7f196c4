//! # rs-spellbook
//!
//! Spell card pipeline: turns hand-authored game entries into structured
//! records and canonical description markup.
//!
//! Each raw entry carries a title, rarity, traits and a body mixing markdown,
//! HTML and custom tags. The body is parsed into a restricted document tree,
//! its leading `Label value` header paragraphs are normalized under a
//! [`FieldRules`] rule set, and the remaining tree is serialized to stable text.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_spellbook::{parse_entry, FieldRules, RawEntry};
//!
//! let entry = RawEntry {
//!     name: "ray of frost".to_string(),
//!     markdown: "**Range** 120 feet\n\n---\n\nYou blast an icy beam.".to_string(),
//!     primary_source: Some("Player Core".to_string()),
//!     ..RawEntry::default()
//! };
//!
//! let record = parse_entry(&entry, &FieldRules::default())?.expect("known source");
//! assert_eq!(record.id, "ray_of_frost");
//! assert!(record.description.contains("<strong>Range</strong> 120 feet"));
//! # Ok::<(), rs_spellbook::Error>(())
//! ```

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// DOM parsing adapter over `dom_query`.
pub mod dom;

/// Arena document tree: builder, sanitizer and formatter.
pub mod document;

/// Header field extraction and parameter collapsing.
pub mod fields;

/// Record metadata: identifiers, actions, rarity, source books.
pub mod metadata;

/// Markdown rendering.
pub mod markdown;

/// Raw entries as cached from the search service.
pub mod entry;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Record files.
pub mod store;

/// Facet catalog.
pub mod catalog;

/// Paginated retrieval into the entry cache.
pub mod retrieve;

/// Batch parsing of a cache file.
pub mod batch;

// Public API - re-exports
pub use batch::{run_parse, ParseSummary};
pub use catalog::FacetCatalog;
pub use entry::RawEntry;
pub use error::{Error, Result};
pub use extract::{canonicalize, describe, parse_entry, Description};
pub use fields::{FieldRules, HeaderField};
pub use options::{Options, DEFAULT_ENDPOINT};
pub use result::{CanonicalRecord, Rarity};
pub use retrieve::{download, DownloadOutcome};
