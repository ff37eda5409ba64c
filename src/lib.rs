//! modcmp - Component manifest comparison library
//!
//! This library loads two component manifests (JSON arrays of
//! `{"modid", "version"}` records), reconciles them into matched,
//! mismatched and one-sided groups, and renders the result:
//! - Manifest loading with schema and duplicate policies
//! - Deterministic reconciliation
//! - Optional catalog lookups for display names
//! - Text and JSON reports, plus an error log on failure

pub mod catalog;
pub mod cli;
pub mod comparator;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod output;
pub mod progress;
pub mod reconcile;
