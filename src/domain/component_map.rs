//! Normalized id → version mapping produced by the loader

use serde::Serialize;
use std::collections::BTreeMap;

/// Mapping from component id to version string
///
/// Keys are unique and iterate in lexicographic order. There are no
/// mutators: a map is built once (by the loader, or by collecting pairs)
/// and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComponentMap {
    entries: BTreeMap<String, String>,
}

impl ComponentMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of components
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no components
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the version recorded for an id
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Returns true if the id is present
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterates ids in lexicographic order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates (id, version) pairs in lexicographic id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, version)| (id.as_str(), version.as_str()))
    }
}

/// Later pairs overwrite earlier ones with the same id.
impl<K, V> FromIterator<(K, V)> for ComponentMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(id, version)| (id.into(), version.into()))
                .collect(),
        }
    }
}
