//! Reconciliation result types

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Versions of one component recorded on each side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionPair {
    /// Version in the left manifest
    pub left: String,
    /// Version in the right manifest
    pub right: String,
}

impl VersionPair {
    /// Creates a new version pair
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Returns the pair with sides exchanged
    pub fn swapped(&self) -> Self {
        Self {
            left: self.right.clone(),
            right: self.left.clone(),
        }
    }
}

/// Group a component id falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    /// Present on both sides with the same version
    Matched,
    /// Present on both sides with different versions
    Mismatched,
    /// Present only in the left manifest
    LeftOnly,
    /// Present only in the right manifest
    RightOnly,
}

/// Outcome of comparing two component maps
///
/// The four groups partition the union of both id sets. Every group
/// iterates in lexicographic id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    matched: BTreeMap<String, String>,
    mismatched: BTreeMap<String, VersionPair>,
    left_only: BTreeSet<String>,
    right_only: BTreeSet<String>,
}

impl ReconciliationResult {
    pub(crate) fn from_parts(
        matched: BTreeMap<String, String>,
        mismatched: BTreeMap<String, VersionPair>,
        left_only: BTreeSet<String>,
        right_only: BTreeSet<String>,
    ) -> Self {
        Self {
            matched,
            mismatched,
            left_only,
            right_only,
        }
    }

    /// Components with identical versions on both sides
    pub fn matched(&self) -> &BTreeMap<String, String> {
        &self.matched
    }

    /// Components present on both sides with differing versions
    pub fn mismatched(&self) -> &BTreeMap<String, VersionPair> {
        &self.mismatched
    }

    /// Components only in the left manifest
    pub fn left_only(&self) -> &BTreeSet<String> {
        &self.left_only
    }

    /// Components only in the right manifest
    pub fn right_only(&self) -> &BTreeSet<String> {
        &self.right_only
    }

    /// Returns which group an id belongs to, if it appeared on either side
    pub fn status_of(&self, id: &str) -> Option<ComponentStatus> {
        if self.matched.contains_key(id) {
            Some(ComponentStatus::Matched)
        } else if self.mismatched.contains_key(id) {
            Some(ComponentStatus::Mismatched)
        } else if self.left_only.contains(id) {
            Some(ComponentStatus::LeftOnly)
        } else if self.right_only.contains(id) {
            Some(ComponentStatus::RightOnly)
        } else {
            None
        }
    }

    /// Number of distinct ids across both manifests
    pub fn total_components(&self) -> usize {
        self.matched.len() + self.mismatched.len() + self.left_only.len() + self.right_only.len()
    }

    /// Returns true if both manifests list exactly the same components and versions
    pub fn is_in_sync(&self) -> bool {
        self.mismatched.is_empty() && self.left_only.is_empty() && self.right_only.is_empty()
    }

    /// Iterates every id that appeared on either side, sorted
    pub fn all_ids(&self) -> impl Iterator<Item = &str> {
        let ids: BTreeSet<&str> = self
            .matched
            .keys()
            .chain(self.mismatched.keys())
            .chain(self.left_only.iter())
            .chain(self.right_only.iter())
            .map(String::as_str)
            .collect();
        ids.into_iter()
    }

    /// Returns the result as if the two inputs had been passed the other way round
    pub fn swapped(&self) -> Self {
        Self {
            matched: self.matched.clone(),
            mismatched: self
                .mismatched
                .iter()
                .map(|(id, pair)| (id.clone(), pair.swapped()))
                .collect(),
            left_only: self.right_only.clone(),
            right_only: self.left_only.clone(),
        }
    }
}
