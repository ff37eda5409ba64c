//! Property-based tests for reconciliation and manifest parsing.
//!
//! Checks that the four groups always partition the union of ids, that
//! swapping inputs swaps the result, and that parsing arbitrary text never
//! panics.

use modcmp::domain::{ComponentMap, ComponentStatus};
use modcmp::manifest::{parse_manifest, LoadOptions};
use modcmp::reconcile::reconcile;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;

/// Small id and version alphabets so overlaps are common
fn component_map() -> impl Strategy<Value = ComponentMap> {
    prop::collection::btree_map("[a-f]{1,2}", "[0-2]\\.[0-2]", 1..12)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn groups_partition_the_union(left in component_map(), right in component_map()) {
        let result = reconcile(&left, &right).unwrap();

        let union: BTreeSet<&str> = left.ids().chain(right.ids()).collect();
        let grouped: Vec<&str> = result.matched().keys().map(String::as_str)
            .chain(result.mismatched().keys().map(String::as_str))
            .chain(result.left_only().iter().map(String::as_str))
            .chain(result.right_only().iter().map(String::as_str))
            .collect();

        // no id lands in two groups
        prop_assert_eq!(grouped.len(), union.len());
        prop_assert_eq!(grouped.into_iter().collect::<BTreeSet<_>>(), union);
    }

    #[test]
    fn groups_follow_versions(left in component_map(), right in component_map()) {
        let result = reconcile(&left, &right).unwrap();

        for id in result.all_ids() {
            let expected = match (left.get(id), right.get(id)) {
                (Some(l), Some(r)) if l == r => ComponentStatus::Matched,
                (Some(_), Some(_)) => ComponentStatus::Mismatched,
                (Some(_), None) => ComponentStatus::LeftOnly,
                (None, Some(_)) => ComponentStatus::RightOnly,
                (None, None) => unreachable!("id from neither side: {}", id),
            };
            prop_assert_eq!(result.status_of(id), Some(expected));
        }
    }

    #[test]
    fn swapping_inputs_swaps_result(left in component_map(), right in component_map()) {
        let forward = reconcile(&left, &right).unwrap();
        let backward = reconcile(&right, &left).unwrap();
        prop_assert_eq!(forward.swapped(), backward);
    }

    #[test]
    fn reconcile_is_deterministic(left in component_map(), right in component_map()) {
        prop_assert_eq!(reconcile(&left, &right).unwrap(), reconcile(&left, &right).unwrap());
    }

    #[test]
    fn self_comparison_is_in_sync(map in component_map()) {
        let result = reconcile(&map, &map).unwrap();
        prop_assert!(result.is_in_sync());
        prop_assert_eq!(result.matched().len(), map.len());
    }

    #[test]
    fn parse_manifest_doesnt_panic(s in "\\PC{0,500}") {
        let _ = parse_manifest(Path::new("fuzz.json"), &s, &LoadOptions::default());
    }

    #[test]
    fn parse_manifest_array_like_doesnt_panic(
        s in prop::string::string_regex(r#"\[[^\]]{0,300}\]"#).unwrap()
    ) {
        let _ = parse_manifest(Path::new("fuzz.json"), &s, &LoadOptions::default());
    }
}
