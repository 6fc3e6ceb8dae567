//! Property-based tests for the deep merge and the concurrent map.
//!
//! These tests use proptest to generate random documents and inputs and
//! verify that the merge and mapping invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::concurrent::concurrent_map;
    use crate::merge::{obj_merge, obj_merge_default};
    use proptest::prelude::*;
    use serde_yaml::{Mapping, Value};
    use std::num::NonZeroUsize;

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            "[a-z0-9]{0,8}".prop_map(Value::String),
        ]
    }

    fn mapping_of(inner: impl Strategy<Value = Value>) -> impl Strategy<Value = Value> {
        prop::collection::vec(("[a-e]{1,2}", inner), 0..5).prop_map(|entries| {
            Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (Value::String(k), v))
                    .collect::<Mapping>(),
            )
        })
    }

    /// Documents at most 4 levels deep, well inside the default bound
    fn document() -> impl Strategy<Value = Value> {
        let tree = leaf().prop_recursive(3, 48, 5, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
                mapping_of(inner),
            ]
        });
        mapping_of(tree)
    }

    fn keys(value: &Value) -> Vec<Value> {
        value
            .as_mapping()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    // ============================================================================
    // obj_merge property tests
    // ============================================================================

    proptest! {
        /// Property: merging a document with itself returns the document
        #[test]
        fn merge_is_idempotent(a in document()) {
            prop_assert_eq!(obj_merge_default(&a, &a).unwrap(), a);
        }

        /// Property: the result holds exactly the union of both key sets
        #[test]
        fn merge_keys_are_union(a in document(), b in document()) {
            let merged = obj_merge_default(&a, &b).unwrap();
            let merged_keys = keys(&merged);
            for key in keys(&a).iter().chain(keys(&b).iter()) {
                prop_assert!(merged_keys.contains(key));
            }
            for key in &merged_keys {
                prop_assert!(keys(&a).contains(key) || keys(&b).contains(key));
            }
        }

        /// Property: b's non-mapping values always win
        #[test]
        fn merge_is_right_biased(a in document(), b in document()) {
            let merged = obj_merge_default(&a, &b).unwrap();
            let b_map = b.as_mapping().unwrap();
            for (key, b_value) in b_map {
                if !b_value.is_mapping() {
                    prop_assert_eq!(merged.get(key), Some(b_value));
                }
            }
        }

        /// Property: keys only in a keep a's value
        #[test]
        fn merge_keeps_left_only_values(a in document(), b in document()) {
            let merged = obj_merge_default(&a, &b).unwrap();
            let b_map = b.as_mapping().unwrap();
            for (key, a_value) in a.as_mapping().unwrap() {
                if !b_map.contains_key(key) {
                    prop_assert_eq!(merged.get(key), Some(a_value));
                }
            }
        }

        /// Property: inputs are never modified
        #[test]
        fn merge_leaves_inputs_untouched(a in document(), b in document()) {
            let (a_before, b_before) = (a.clone(), b.clone());
            let _ = obj_merge_default(&a, &b);
            prop_assert_eq!(a, a_before);
            prop_assert_eq!(b, b_before);
        }

        /// Property: nesting beyond the bound always fails, within it always succeeds
        #[test]
        fn merge_depth_bound_is_exact(levels in 1usize..16, bound in 0usize..16) {
            let mut a = Value::Mapping(Mapping::from_iter([("x".into(), 1.into())]));
            let mut b = Value::Mapping(Mapping::from_iter([("x".into(), 2.into())]));
            for _ in 1..levels {
                a = Value::Mapping(Mapping::from_iter([("n".into(), a)]));
                b = Value::Mapping(Mapping::from_iter([("n".into(), b)]));
            }
            prop_assert_eq!(obj_merge(&a, &b, bound).is_ok(), levels <= bound);
        }
    }

    // ============================================================================
    // concurrent_map property tests
    // ============================================================================

    proptest! {
        /// Property: output matches a sequential map for any input and bound
        #[test]
        fn concurrent_map_matches_sequential(
            items in prop::collection::vec(any::<i32>(), 0..40),
            concurrency in 1usize..8,
        ) {
            let concurrency = NonZeroUsize::new(concurrency).unwrap();
            let result = concurrent_map(concurrency, &items, |x, idx| {
                Ok::<_, String>((i64::from(*x) * 2, idx))
            })
            .unwrap();
            let expected: Vec<(i64, usize)> = items
                .iter()
                .enumerate()
                .map(|(idx, x)| (i64::from(*x) * 2, idx))
                .collect();
            prop_assert_eq!(result, expected);
        }
    }
}
