//! Application error types using thiserror
//!
//! Error hierarchy:
//! - LoadError: a manifest could not be turned into a component map
//! - ReconcileError: two component maps could not be compared
//! - ConfigError: the configuration file is unreadable or invalid
//! - CatalogError: enrichment lookups failed (never terminal)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Side;

/// Application-level error type
///
/// Every variant is terminal for the run and maps to a distinct exit code.
#[derive(Error, Debug)]
pub enum AppError {
    /// A manifest failed to load
    #[error("{label} manifest: {source}")]
    Manifest {
        label: String,
        #[source]
        source: LoadError,
    },

    /// The reconciler rejected its inputs
    #[error("{label} manifest: {source}")]
    Reconcile {
        label: String,
        #[source]
        source: ReconcileError,
    },

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The command line could not be parsed
    #[error("invalid command line: {0}")]
    Usage(String),
}

impl AppError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::Usage(_) => 2,
            AppError::Manifest { .. } => 3,
            AppError::Reconcile { .. } => 4,
        }
    }
}

/// Broad category of a load failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Source missing or not a single regular file
    NotFound,
    /// Source exists but cannot be read
    Permission,
    /// Content is not an array of objects
    Format,
    /// Records lack required fields or violate the duplicate policy
    Schema,
}

/// Errors produced while loading a manifest file
#[derive(Error, Debug)]
pub enum LoadError {
    /// Manifest file does not exist
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("manifest path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// File cannot be opened for reading
    #[error("permission denied reading manifest file: {path}")]
    PermissionDenied { path: PathBuf },

    /// Any other IO failure while reading
    #[error("failed to read manifest file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content is not a JSON array of objects
    #[error("invalid manifest format in {path}: {message}")]
    Format { path: PathBuf, message: String },

    /// Records missing `id`/`modid` or `version`
    #[error(
        "invalid records in {path}: record(s) {indices:?} missing a non-empty 'modid'/'id' or a 'version' string"
    )]
    Schema { path: PathBuf, indices: Vec<usize> },

    /// Same id listed more than once under the reject policy
    #[error("duplicate component ids in {path}: {}", ids.join(", "))]
    DuplicateIds { path: PathBuf, ids: Vec<String> },
}

/// Errors produced by the reconciler
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// One of the inputs has no components
    #[error("{side} input has no components; refusing to compare against an empty list")]
    EmptyInput { side: Side },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this tool
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A value is out of range
    #[error("invalid configuration value for '{key}': {message}")]
    Invalid { key: String, message: String },
}

/// Errors raised by catalog lookups
///
/// These are caught at the enrichment boundary and only degrade the
/// displayed metadata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog answered with something other than success or 404
    #[error("failed to look up '{id}' in {catalog}: {message}")]
    Network {
        id: String,
        catalog: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {catalog}")]
    RateLimited { catalog: String },

    /// Response body could not be decoded
    #[error("invalid response from {catalog} for '{id}': {message}")]
    InvalidResponse {
        id: String,
        catalog: String,
        message: String,
    },

    /// Lookup did not finish in time
    #[error("timeout while looking up '{id}' in {catalog}")]
    Timeout { id: String, catalog: String },
}

impl LoadError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        LoadError::NotFound { path: path.into() }
    }

    /// Creates a new Format error
    pub fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LoadError::Format {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Maps an IO error from opening or reading the file
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => LoadError::PermissionDenied { path },
            _ => LoadError::Read { path, source },
        }
    }

    /// Returns the category of this failure
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::NotFound { .. } | LoadError::NotAFile { .. } => LoadErrorKind::NotFound,
            LoadError::PermissionDenied { .. } | LoadError::Read { .. } => {
                LoadErrorKind::Permission
            }
            LoadError::Format { .. } => LoadErrorKind::Format,
            LoadError::Schema { .. } | LoadError::DuplicateIds { .. } => LoadErrorKind::Schema,
        }
    }
}

impl CatalogError {
    /// Creates a new Network error
    pub fn network(
        id: impl Into<String>,
        catalog: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        CatalogError::Network {
            id: id.into(),
            catalog: catalog.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(id: impl Into<String>, catalog: impl Into<String>) -> Self {
        CatalogError::Timeout {
            id: id.into(),
            catalog: catalog.into(),
        }
    }
}
