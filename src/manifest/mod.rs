//! Manifest loading
//!
//! This module provides:
//! - File access checks (missing, not a file, unreadable)
//! - JSON array parsing and per-record validation
//! - Explicit policies for invalid records and duplicate ids

mod loader;
mod policy;
mod records;

pub use loader::load;
pub use policy::{DuplicatePolicy, LoadOptions, SchemaPolicy};
pub use records::{parse_manifest, ID_FIELDS, VERSION_FIELD};
