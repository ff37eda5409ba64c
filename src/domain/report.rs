//! Report structures handed to output formatters

use super::{LoadedManifest, MetadataEntry, ReconciliationResult, Side};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// What the report shows about one input manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestSummary {
    /// Which input this is
    pub side: Side,
    /// Display label (e.g. "client")
    pub label: String,
    /// Source file
    pub path: PathBuf,
    /// Number of distinct components loaded
    pub components: usize,
    /// Indices of skipped records
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_records: Vec<usize>,
    /// Ids that appeared more than once
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overwritten_ids: Vec<String>,
}

impl ManifestSummary {
    /// Builds a summary from a loaded manifest
    pub fn from_loaded(side: Side, label: impl Into<String>, loaded: &LoadedManifest) -> Self {
        Self {
            side,
            label: label.into(),
            path: loaded.path.clone(),
            components: loaded.components.len(),
            skipped_records: loaded.skipped.clone(),
            overwritten_ids: loaded.overwritten.clone(),
        }
    }
}

/// Group sizes of a reconciliation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportCounts {
    pub matched: usize,
    pub mismatched: usize,
    pub left_only: usize,
    pub right_only: usize,
}

impl From<&ReconciliationResult> for ReportCounts {
    fn from(result: &ReconciliationResult) -> Self {
        Self {
            matched: result.matched().len(),
            mismatched: result.mismatched().len(),
            left_only: result.left_only().len(),
            right_only: result.right_only().len(),
        }
    }
}

/// Everything a formatter needs to render one comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    /// Left manifest summary
    pub left: ManifestSummary,
    /// Right manifest summary
    pub right: ManifestSummary,
    /// Group sizes
    pub counts: ReportCounts,
    /// The reconciliation itself
    pub result: ReconciliationResult,
    /// Per-id catalog metadata (empty when enrichment is off)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, MetadataEntry>,
}

impl ComparisonReport {
    /// Creates a report without metadata
    pub fn new(left: ManifestSummary, right: ManifestSummary, result: ReconciliationResult) -> Self {
        Self {
            left,
            right,
            counts: ReportCounts::from(&result),
            result,
            metadata: BTreeMap::new(),
        }
    }

    /// Attaches catalog metadata
    pub fn with_metadata(mut self, metadata: BTreeMap<String, MetadataEntry>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Metadata for an id, if enrichment ran
    pub fn metadata_for(&self, id: &str) -> Option<&MetadataEntry> {
        self.metadata.get(id)
    }

    /// Label for a side
    pub fn label(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left.label,
            Side::Right => &self.right.label,
        }
    }
}
