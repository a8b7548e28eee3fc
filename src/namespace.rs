//! Prefix-scoped key-value stores.
//!
//! Service environment variables and secret bindings are composed from a
//! shared default vocabulary plus per-service overrides. Each store scopes
//! its logical keys under an optional prefix so that two independently
//! configured stores can reuse the same logical names (e.g. `DATABASE_HOST`)
//! without colliding in the merged output.

use crate::error::NamespaceError;
use std::collections::BTreeMap;

/// Delimiter between the prefix and the logical key.
const PREFIX_DELIMITER: &str = "_";

/// Well-known logical keys for the service environment vocabulary.
pub mod env_keys {
    /// Application prefix used to namespace environment variables.
    pub const APP_PREFIX: &str = "APP_PREFIX";

    // Database credentials surfaced from the database capability.
    pub const DATABASE_USERNAME: &str = "DATABASE_USERNAME";
    pub const DATABASE_PASSWORD: &str = "DATABASE_PASSWORD";
    pub const DATABASE_HOST: &str = "DATABASE_HOST";
    pub const DATABASE_PORT: &str = "DATABASE_PORT";
    pub const DATABASE_DB_NAME: &str = "DATABASE_DB_NAME";

    /// Locator of the application messaging topic.
    pub const APPLICATION_TOPIC: &str = "MESSAGING_APPLICATION_TOPIC";
}

/// A mapping from logical key to value, stored under prefixed physical keys.
///
/// A plain map plus a prefixing policy, kept as composition so the merge
/// contract stays independently testable.
#[derive(Debug, Clone, Default)]
pub struct NamespacedStore<V> {
    prefix: Option<String>,
    entries: BTreeMap<String, V>,
    // physical key -> logical key that populated it, for collision checks
    origins: BTreeMap<String, String>,
}

impl<V: Clone> NamespacedStore<V> {
    /// Store without a prefix; physical keys equal logical keys.
    pub fn new() -> Self {
        Self {
            prefix: None,
            entries: BTreeMap::new(),
            origins: BTreeMap::new(),
        }
    }

    /// Store scoping every logical key under `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: if prefix.is_empty() { None } else { Some(prefix) },
            entries: BTreeMap::new(),
            origins: BTreeMap::new(),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Physical key for a logical key under this store's prefix rule.
    pub fn physical_key(&self, logical: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{PREFIX_DELIMITER}{logical}"),
            None => logical.to_string(),
        }
    }

    /// Store `value` under the prefixed form of `logical`. Chainable.
    pub fn set(&mut self, logical: &str, value: V) -> &mut Self {
        let physical = self.physical_key(logical);
        self.entries.insert(physical.clone(), value);
        self.origins.insert(physical, logical.to_string());
        self
    }

    /// Store `value` under an already-physical key, bypassing the prefix
    /// rule. Used for entries that were computed in merged (physical) form.
    pub fn set_raw(&mut self, physical: &str, value: V) -> &mut Self {
        self.entries.insert(physical.to_string(), value);
        self.origins.insert(physical.to_string(), physical.to_string());
        self
    }

    /// Look up a value by its logical key.
    pub fn get(&self, logical: &str) -> Option<&V> {
        self.entries.get(&self.physical_key(logical))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge stored entries with `overrides` into a flat physical-keyed map.
    ///
    /// Stored entries are taken as-is (already physical-keyed); each override
    /// is re-keyed by the prefix rule before insertion. When an override's
    /// physical key matches a stored key the override wins. The merge is
    /// deterministic and independent of insertion order of unrelated keys.
    pub fn apply(&self, overrides: &BTreeMap<String, V>) -> BTreeMap<String, V> {
        let mut merged = self.entries.clone();
        for (logical, value) in overrides {
            merged.insert(self.physical_key(logical), value.clone());
        }
        merged
    }

    /// Like [`apply`](Self::apply), but surfaces overrides whose physical key
    /// rebinds an entry that was populated from a *different* logical key.
    /// Overriding the same logical key remains a legitimate last-write-wins.
    pub fn apply_checked(
        &self,
        overrides: &BTreeMap<String, V>,
    ) -> Result<BTreeMap<String, V>, NamespaceError> {
        let mut merged = self.entries.clone();
        for (logical, value) in overrides {
            let physical = self.physical_key(logical);
            if let Some(existing) = self.origins.get(&physical) {
                if existing != logical {
                    return Err(NamespaceError::Collision {
                        key: logical.clone(),
                        physical,
                        existing: existing.clone(),
                    });
                }
            }
            merged.insert(physical, value.clone());
        }
        Ok(merged)
    }
}

/// Plain environment variables for one service.
pub type ServiceEnvironment = NamespacedStore<String>;

/// Opaque secret bindings for one service.
pub type ServiceSecrets = NamespacedStore<crate::synth::handles::SecretBinding>;

impl ServiceEnvironment {
    /// Environment store seeded with the `APP_PREFIX` entry, matching the
    /// convention consumed by the application at runtime.
    pub fn for_app(app_prefix: &str) -> Self {
        let mut store = if app_prefix.is_empty() {
            Self::new()
        } else {
            Self::with_prefix(app_prefix)
        };
        store.set(env_keys::APP_PREFIX, app_prefix.to_string());
        store
    }
}
