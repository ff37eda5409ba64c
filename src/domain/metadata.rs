//! Display metadata attached to components by catalog lookups

use serde::Serialize;

/// Descriptive metadata for one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentMetadata {
    /// Human-friendly name
    pub display_name: String,
    /// Short description
    pub description: String,
    /// Catalog the metadata came from
    pub source_platform: String,
}

impl ComponentMetadata {
    /// Creates new metadata
    pub fn new(
        display_name: impl Into<String>,
        description: impl Into<String>,
        source_platform: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            description: description.into(),
            source_platform: source_platform.into(),
        }
    }
}

/// Lookup outcome as shown in reports
///
/// Absent entries, lookup failures and timeouts all collapse to `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetadataEntry {
    /// Catalog returned metadata
    Known(ComponentMetadata),
    /// Nothing usable came back
    Unknown,
}

impl MetadataEntry {
    /// Returns the metadata if known
    pub fn known(&self) -> Option<&ComponentMetadata> {
        match self {
            MetadataEntry::Known(metadata) => Some(metadata),
            MetadataEntry::Unknown => None,
        }
    }

    /// Display name, or "unknown"
    pub fn display_name(&self) -> &str {
        self.known()
            .map(|m| m.display_name.as_str())
            .unwrap_or("unknown")
    }
}

impl From<Option<ComponentMetadata>> for MetadataEntry {
    fn from(value: Option<ComponentMetadata>) -> Self {
        value.map(MetadataEntry::Known).unwrap_or(MetadataEntry::Unknown)
    }
}
