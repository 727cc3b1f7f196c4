//! Facet catalog.
//!
//! Collects the filter values the site offers (traditions, traits, sources)
//! per ruleset across every parsed record, and writes them out once at the
//! end of a run.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::result::{CanonicalRecord, Rarity};

/// File name of the catalog inside the output directory.
pub const CATALOG_FILE: &str = "filters.json";

/// Entry types offered as a filter.
pub static ENTRY_TYPES: [&str; 3] = ["cantrip", "focus", "spell"];

/// Highest level offered as a filter.
pub const MAX_LEVEL: u32 = 10;

/// Facet values seen for one ruleset. Sets keep the lists sorted and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionFacets {
    #[serde(rename = "Traditions")]
    pub traditions: BTreeSet<String>,
    #[serde(rename = "Traits")]
    pub traits: BTreeSet<String>,
    #[serde(rename = "Source")]
    pub sources: BTreeSet<String>,
}

impl EditionFacets {
    fn observe(&mut self, record: &CanonicalRecord) {
        self.traditions.extend(record.traditions.iter().cloned());
        self.traits.extend(record.traits.iter().cloned());
        self.sources.insert(record.source.clone());
    }
}

/// Facets shared by both rulesets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticFilters {
    #[serde(rename = "Type")]
    pub types: Vec<String>,
    #[serde(rename = "Level")]
    pub levels: Vec<u32>,
    #[serde(rename = "Rarity")]
    pub rarities: Vec<Rarity>,
}

impl Default for StaticFilters {
    fn default() -> Self {
        Self {
            types: ENTRY_TYPES.iter().map(|t| (*t).to_string()).collect(),
            levels: (1..=MAX_LEVEL).collect(),
            rarities: Rarity::ALL.to_vec(),
        }
    }
}

/// Catalog of facet values, accumulated one record at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCatalog {
    pub filters: StaticFilters,
    pub legacy: EditionFacets,
    pub remaster: EditionFacets,
}

impl FacetCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fully parsed record to the facets of each ruleset it belongs to.
    pub fn observe(&mut self, record: &CanonicalRecord) {
        if record.legacy {
            self.legacy.observe(record);
        }
        if record.remaster {
            self.remaster.observe(record);
        }
    }

    /// Serialize the catalog as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the catalog to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an I/O or JSON error.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), "wrote facet catalog");
        Ok(())
    }
}
