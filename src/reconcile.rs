//! Reconciliation of two component maps
//!
//! Versions are compared as opaque strings: no parsing, no trimming,
//! case-sensitive equality only.

use crate::domain::{ComponentMap, ReconciliationResult, Side, VersionPair};
use crate::error::ReconcileError;
use std::collections::{BTreeMap, BTreeSet};

/// Compare two component maps
///
/// Fails if either side is empty.
pub fn reconcile(
    left: &ComponentMap,
    right: &ComponentMap,
) -> Result<ReconciliationResult, ReconcileError> {
    if left.is_empty() {
        return Err(ReconcileError::EmptyInput { side: Side::Left });
    }
    if right.is_empty() {
        return Err(ReconcileError::EmptyInput { side: Side::Right });
    }

    let mut matched = BTreeMap::new();
    let mut mismatched = BTreeMap::new();
    let mut left_only = BTreeSet::new();

    for (id, left_version) in left.iter() {
        match right.get(id) {
            Some(right_version) if right_version == left_version => {
                matched.insert(id.to_string(), left_version.to_string());
            }
            Some(right_version) => {
                mismatched.insert(id.to_string(), VersionPair::new(left_version, right_version));
            }
            None => {
                left_only.insert(id.to_string());
            }
        }
    }

    let right_only: BTreeSet<String> = right
        .ids()
        .filter(|id| !left.contains(id))
        .map(str::to_string)
        .collect();

    Ok(ReconciliationResult::from_parts(
        matched, mismatched, left_only, right_only,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ComponentStatus;

    fn map(pairs: &[(&str, &str)]) -> ComponentMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_reference_scenario() {
        let left = map(&[("alpha", "1.0"), ("beta", "2.0")]);
        let right = map(&[("alpha", "1.0"), ("beta", "2.1"), ("gamma", "1.0")]);

        let result = reconcile(&left, &right).unwrap();

        assert_eq!(result.matched().len(), 1);
        assert_eq!(result.matched()["alpha"], "1.0");
        assert_eq!(result.mismatched().len(), 1);
        assert_eq!(result.mismatched()["beta"], VersionPair::new("2.0", "2.1"));
        assert!(result.left_only().is_empty());
        assert_eq!(
            result.right_only().iter().collect::<Vec<_>>(),
            vec!["gamma"]
        );
    }

    #[test]
    fn test_disjoint_sets() {
        let left = map(&[("a", "1"), ("b", "1")]);
        let right = map(&[("c", "1"), ("d", "2")]);

        let result = reconcile(&left, &right).unwrap();

        assert!(result.matched().is_empty());
        assert!(result.mismatched().is_empty());
        assert_eq!(result.left_only().len(), 2);
        assert_eq!(result.right_only().len(), 2);
        assert!(result.left_only().contains("a"));
        assert!(result.right_only().contains("d"));
    }

    #[test]
    fn test_identical_maps_are_in_sync() {
        let left = map(&[("jei", "15.2.0"), ("create", "0.5.1")]);
        let result = reconcile(&left, &left.clone()).unwrap();

        assert_eq!(result.matched().len(), 2);
        assert!(result.is_in_sync());
    }

    #[test]
    fn test_versions_compared_exactly() {
        let left = map(&[("a", "1.0"), ("b", "V1"), ("c", "1.0")]);
        let right = map(&[("a", "1.0.0"), ("b", "v1"), ("c", "1.0 ")]);

        let result = reconcile(&left, &right).unwrap();

        assert!(result.matched().is_empty());
        assert_eq!(result.mismatched().len(), 3);
    }

    #[test]
    fn test_ids_are_case_sensitive() {
        let left = map(&[("JEI", "1")]);
        let right = map(&[("jei", "1")]);

        let result = reconcile(&left, &right).unwrap();

        assert_eq!(result.status_of("JEI"), Some(ComponentStatus::LeftOnly));
        assert_eq!(result.status_of("jei"), Some(ComponentStatus::RightOnly));
    }

    #[test]
    fn test_only_groups_are_sorted() {
        let left = map(&[("zeta", "1"), ("beta", "1"), ("shared", "1")]);
        let right = map(&[("shared", "1"), ("omega", "1"), ("alpha", "1")]);

        let result = reconcile(&left, &right).unwrap();

        assert_eq!(
            result.left_only().iter().collect::<Vec<_>>(),
            vec!["beta", "zeta"]
        );
        assert_eq!(
            result.right_only().iter().collect::<Vec<_>>(),
            vec!["alpha", "omega"]
        );
    }

    #[test]
    fn test_idempotent() {
        let left = map(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let right = map(&[("b", "2"), ("c", "4"), ("d", "5")]);

        let first = reconcile(&left, &right).unwrap();
        let second = reconcile(&left, &right).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_symmetry() {
        let left = map(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let right = map(&[("b", "2"), ("c", "4"), ("d", "5")]);

        let forward = reconcile(&left, &right).unwrap();
        let backward = reconcile(&right, &left).unwrap();

        assert_eq!(
            forward.mismatched().keys().collect::<Vec<_>>(),
            backward.mismatched().keys().collect::<Vec<_>>()
        );
        assert_eq!(backward.mismatched()["c"], VersionPair::new("4", "3"));
        assert_eq!(forward.swapped(), backward);
    }

    #[test]
    fn test_empty_right_is_rejected() {
        let left = map(&[("a", "1")]);
        let err = reconcile(&left, &ComponentMap::new()).unwrap_err();
        assert_eq!(err, ReconcileError::EmptyInput { side: Side::Right });
    }

    #[test]
    fn test_empty_left_is_rejected() {
        let right = map(&[("a", "1")]);
        let err = reconcile(&ComponentMap::new(), &right).unwrap_err();
        assert_eq!(err, ReconcileError::EmptyInput { side: Side::Left });
    }

    #[test]
    fn test_inputs_untouched() {
        let left = map(&[("a", "1")]);
        let right = map(&[("a", "2")]);
        let (left_before, right_before) = (left.clone(), right.clone());

        reconcile(&left, &right).unwrap();

        assert_eq!(left, left_before);
        assert_eq!(right, right_before);
    }
}
