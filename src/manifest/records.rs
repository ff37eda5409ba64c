//! Manifest content parsing and record validation
//!
//! A manifest is a JSON array of objects. Each object needs a non-empty
//! string id (`modid`, or `id`) and a string `version`; other fields are
//! ignored.

use super::{DuplicatePolicy, LoadOptions, SchemaPolicy};
use crate::domain::{ComponentMap, LoadedManifest};
use crate::error::LoadError;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, warn};

/// Accepted identifier keys, in priority order
pub const ID_FIELDS: &[&str] = &["modid", "id"];

/// Version key
pub const VERSION_FIELD: &str = "version";

/// Parse manifest content read from `path`
pub fn parse_manifest(
    path: &Path,
    content: &str,
    options: &LoadOptions,
) -> Result<LoadedManifest, LoadError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    if !content.trim_start().starts_with('[') {
        return Err(LoadError::format(
            path,
            "expected a JSON array of records as the top-level value",
        ));
    }

    let value: Value = serde_json::from_str(content)
        .map_err(|e| LoadError::format(path, format!("invalid JSON: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(LoadError::format(
            path,
            "expected a JSON array of records as the top-level value",
        ));
    };

    let non_objects: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is_object())
        .map(|(index, _)| index)
        .collect();
    if !non_objects.is_empty() {
        return Err(LoadError::format(
            path,
            format!("record(s) {:?} are not JSON objects", non_objects),
        ));
    }

    let record_count = items.len();
    let mut entries: BTreeMap<String, String> = BTreeMap::new();
    let mut invalid = Vec::new();
    let mut overwritten = BTreeSet::new();

    for (index, item) in items.iter().enumerate() {
        let Some(record) = item.as_object() else {
            continue;
        };

        match extract_record(record) {
            Some((id, version)) => {
                if entries.insert(id.to_string(), version.to_string()).is_some() {
                    overwritten.insert(id.to_string());
                }
            }
            None => invalid.push(index),
        }
    }

    if !invalid.is_empty() {
        match options.schema {
            SchemaPolicy::Strict => {
                return Err(LoadError::Schema {
                    path: path.to_path_buf(),
                    indices: invalid,
                });
            }
            SchemaPolicy::Skip => {
                warn!(
                    path = %path.display(),
                    skipped = invalid.len(),
                    "skipping records without a usable id or version: {:?}",
                    invalid
                );
            }
        }
    }

    let overwritten: Vec<String> = overwritten.into_iter().collect();
    if !overwritten.is_empty() {
        match options.duplicates {
            DuplicatePolicy::Reject => {
                return Err(LoadError::DuplicateIds {
                    path: path.to_path_buf(),
                    ids: overwritten,
                });
            }
            DuplicatePolicy::LastWins => {
                warn!(
                    path = %path.display(),
                    "duplicate ids, keeping the last entry: {}",
                    overwritten.join(", ")
                );
            }
        }
    }

    Ok(finish(path, entries, record_count, invalid, overwritten))
}

fn finish(
    path: &Path,
    entries: BTreeMap<String, String>,
    record_count: usize,
    skipped: Vec<usize>,
    overwritten: Vec<String>,
) -> LoadedManifest {
    debug!(
        path = %path.display(),
        records = record_count,
        components = entries.len(),
        "parsed manifest"
    );

    LoadedManifest {
        path: path.to_path_buf(),
        components: entries.into_iter().collect::<ComponentMap>(),
        record_count,
        skipped,
        overwritten,
    }
}

/// Pull the id and version out of one record
fn extract_record(record: &Map<String, Value>) -> Option<(&str, &str)> {
    let id = ID_FIELDS
        .iter()
        .find_map(|field| record.get(*field))?
        .as_str()
        .filter(|id| !id.is_empty())?;
    let version = record.get(VERSION_FIELD)?.as_str()?;
    Some((id, version))
}
