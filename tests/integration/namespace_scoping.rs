//! Integration tests for prefix-scoped environment composition.

use std::collections::BTreeMap;
use strata::error::NamespaceError;
use strata::namespace::{env_keys, NamespacedStore, ServiceEnvironment};

fn overrides(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_two_services_share_logical_vocabulary() {
    let mut api = ServiceEnvironment::for_app("API");
    let mut worker = ServiceEnvironment::for_app("WORKER");

    // Both use the same logical keys.
    api.set(env_keys::DATABASE_HOST, "db.internal".to_string());
    worker.set(env_keys::DATABASE_HOST, "db.internal".to_string());

    let merged_api = api.apply(&BTreeMap::new());
    let merged_worker = worker.apply(&BTreeMap::new());

    assert!(merged_api.contains_key("API_DATABASE_HOST"));
    assert!(merged_worker.contains_key("WORKER_DATABASE_HOST"));
    for key in merged_api.keys() {
        assert!(!merged_worker.contains_key(key), "shared key {key}");
    }
}

#[test]
fn test_config_overrides_win_over_computed_defaults() {
    let mut store = ServiceEnvironment::for_app("");
    store.set("PORT", "80".to_string());
    store.set(env_keys::APPLICATION_TOPIC, "topic/dev-backend-application".to_string());

    let merged = store
        .apply_checked(&overrides(&[("PORT", "8080")]))
        .unwrap();

    assert_eq!(merged.get("PORT"), Some(&"8080".to_string()));
    assert_eq!(
        merged.get(env_keys::APPLICATION_TOPIC),
        Some(&"topic/dev-backend-application".to_string())
    );
}

#[test]
fn test_merge_is_insertion_order_independent() {
    let mut a: NamespacedStore<String> = NamespacedStore::with_prefix("SVC");
    a.set("A", "1".to_string()).set("B", "2".to_string());

    let mut b: NamespacedStore<String> = NamespacedStore::with_prefix("SVC");
    b.set("B", "2".to_string()).set("A", "1".to_string());

    assert_eq!(a.apply(&BTreeMap::new()), b.apply(&BTreeMap::new()));
}

#[test]
fn test_cross_key_rebind_is_surfaced() {
    let mut store: NamespacedStore<String> = NamespacedStore::with_prefix("API");
    store.set_raw("API_HOST", "computed".to_string());

    let err = store
        .apply_checked(&overrides(&[("HOST", "override")]))
        .unwrap_err();
    assert!(matches!(err, NamespaceError::Collision { .. }));

    // The unchecked merge keeps last-write-wins semantics.
    let merged = store.apply(&overrides(&[("HOST", "override")]));
    assert_eq!(merged.get("API_HOST"), Some(&"override".to_string()));
}
