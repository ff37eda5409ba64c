//! Manifest file access
//!
//! Checks that the source is a readable regular file before handing the
//! content to the record parser.

use super::{parse_manifest, LoadOptions};
use crate::domain::LoadedManifest;
use crate::error::LoadError;
use std::path::Path;
use tracing::debug;

/// Load a manifest file into a component map
///
/// Reads the file once. On failure nothing is returned but the error.
pub fn load(path: &Path, options: &LoadOptions) -> Result<LoadedManifest, LoadError> {
    debug!(path = %path.display(), schema = %options.schema, duplicates = %options.duplicates, "loading manifest");

    let metadata = std::fs::metadata(path).map_err(|e| LoadError::from_io(path, e))?;
    if !metadata.is_file() {
        return Err(LoadError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| LoadError::from_io(path, e))?;
    let content = String::from_utf8(bytes)
        .map_err(|e| LoadError::format(path, format!("file is not valid UTF-8: {}", e)))?;

    parse_manifest(path, &content, options)
}
