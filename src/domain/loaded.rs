//! Loader output with load statistics

use super::ComponentMap;
use std::path::PathBuf;

/// A component map together with what happened while loading it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedManifest {
    /// File the map was read from
    pub path: PathBuf,
    /// The normalized components
    pub components: ComponentMap,
    /// Number of records in the raw array
    pub record_count: usize,
    /// Indices of records dropped under the skip policy
    pub skipped: Vec<usize>,
    /// Ids whose earlier entries were overwritten by later ones, sorted
    pub overwritten: Vec<String>,
}

impl LoadedManifest {
    /// Creates a manifest with no skipped or overwritten records
    pub fn new(path: impl Into<PathBuf>, components: ComponentMap) -> Self {
        let record_count = components.len();
        Self {
            path: path.into(),
            components,
            record_count,
            skipped: Vec::new(),
            overwritten: Vec::new(),
        }
    }

    /// Returns true if any record was skipped or overwritten
    pub fn has_warnings(&self) -> bool {
        !self.skipped.is_empty() || !self.overwritten.is_empty()
    }
}
