//! Property-based tests for the namespaced store merge contract

use proptest::prelude::*;
use std::collections::BTreeMap;
use strata::namespace::NamespacedStore;

fn logical_key() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,15}"
}

fn entries() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map(logical_key(), "[a-z0-9]{0,10}", 0..8)
}

/// Test that merging is deterministic for the same inputs
#[test]
fn test_merge_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(entries(), entries()), |(base, overrides)| {
            let mut store: NamespacedStore<String> = NamespacedStore::with_prefix("SVC");
            for (key, value) in &base {
                store.set(key, value.clone());
            }

            assert_eq!(store.apply(&overrides), store.apply(&overrides));
            Ok(())
        })
        .unwrap();
}

/// Test that every override lands under its prefixed key and wins
#[test]
fn test_override_wins_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(entries(), entries()), |(base, overrides)| {
            let mut store: NamespacedStore<String> = NamespacedStore::with_prefix("SVC");
            for (key, value) in &base {
                store.set(key, value.clone());
            }

            let merged = store.apply(&overrides);
            for (logical, value) in &overrides {
                assert_eq!(merged.get(&store.physical_key(logical)), Some(value));
            }
            // Non-overridden base entries survive untouched.
            for (logical, value) in &base {
                if !overrides.contains_key(logical) {
                    assert_eq!(merged.get(&store.physical_key(logical)), Some(value));
                }
            }
            Ok(())
        })
        .unwrap();
}

/// Test that stores with distinct prefixes occupy disjoint key spaces
#[test]
fn test_prefix_isolation_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&entries(), |base| {
            let mut a: NamespacedStore<String> = NamespacedStore::with_prefix("SVCA");
            let mut b: NamespacedStore<String> = NamespacedStore::with_prefix("SVCB");
            for (key, value) in &base {
                a.set(key, value.clone());
                b.set(key, value.clone());
            }

            let merged_a = a.apply(&BTreeMap::new());
            let merged_b = b.apply(&BTreeMap::new());
            for key in merged_a.keys() {
                assert!(!merged_b.contains_key(key));
            }
            Ok(())
        })
        .unwrap();
}

/// Test that checked merge accepts any override set built from set() entries
#[test]
fn test_checked_merge_accepts_same_logical_keys_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(entries(), entries()), |(base, overrides)| {
            let mut store: NamespacedStore<String> = NamespacedStore::with_prefix("SVC");
            for (key, value) in &base {
                store.set(key, value.clone());
            }

            // Entries placed through set() are owned by their logical key,
            // so overriding them is always a legitimate last-write-wins.
            let merged = store.apply_checked(&overrides).unwrap();
            assert_eq!(merged, store.apply(&overrides));
            Ok(())
        })
        .unwrap();
}
