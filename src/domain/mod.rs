//! Core domain models for modcmp
//!
//! This module contains the fundamental types used throughout the application:
//! - Side designation for the two inputs
//! - The normalized component map produced by the loader
//! - Reconciliation results
//! - Catalog metadata and the report handed to formatters

mod component_map;
mod loaded;
mod metadata;
mod reconciliation;
mod report;
mod side;

pub use component_map::ComponentMap;
pub use loaded::LoadedManifest;
pub use metadata::{ComponentMetadata, MetadataEntry};
pub use reconciliation::{ComponentStatus, ReconciliationResult, VersionPair};
pub use report::{ComparisonReport, ManifestSummary, ReportCounts};
pub use side::Side;
