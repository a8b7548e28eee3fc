//! Deterministic name generation.
//!
//! Derives construct identifiers, resource names, and hierarchical paths from
//! a stable `(environment, application, key)` triple. Pure derivation: the
//! same inputs always yield the same output, so synthesized topologies are
//! reproducible across runs and environments never collide with each other.

use crate::error::NamingError;
use heck::{ToKebabCase, ToUpperCamelCase};
use std::collections::BTreeMap;
use std::fmt;

/// Default segment delimiter for ids and names.
pub const DEFAULT_DELIMITER: &str = "-";

/// Which derivation produced a generated string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NameKind {
    Id,
    Name,
    Path,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Id => write!(f, "id"),
            NameKind::Name => write!(f, "name"),
            NameKind::Path => write!(f, "path"),
        }
    }
}

/// Deterministic generator for environment-scoped identifiers.
///
/// Holds no hidden state: every output is a total function of the
/// environment name, application name, key, and delimiter.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    app_name: String,
    env_name: String,
    delimiter: String,
}

impl NameGenerator {
    pub fn new(app_name: impl Into<String>, env_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            env_name: env_name.into(),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Reconfigure the delimiter used by [`generate_id`](Self::generate_id)
    /// and [`generate_name`](Self::generate_name). Paths are unaffected.
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) {
        self.delimiter = delimiter.into();
    }

    /// Construct identifier: UpperCamelCase segments joined by the delimiter.
    ///
    /// Used wherever a globally unique construct id is required.
    pub fn generate_id(&self, key: &str) -> String {
        self.join(key, &self.delimiter, |s| s.to_upper_camel_case())
    }

    /// Resource name: kebab-case segments joined by the delimiter.
    ///
    /// Used for names visible in provider consoles and DNS.
    pub fn generate_name(&self, key: &str) -> String {
        self.join(key, &self.delimiter, |s| s.to_kebab_case())
    }

    /// Hierarchical path: kebab-case segments joined by `/`, regardless of
    /// the configured delimiter. Used for secret/parameter namespaces.
    pub fn generate_path(&self, key: &str) -> String {
        self.join(key, "/", |s| s.to_kebab_case())
    }

    fn join(&self, key: &str, sep: &str, transform: impl Fn(&str) -> String) -> String {
        [self.env_name.as_str(), self.app_name.as_str(), key]
            .iter()
            .map(|s| transform(s))
            .collect::<Vec<_>>()
            .join(sep)
    }
}

/// Collision guard over generated outputs.
///
/// The casing transforms can collapse distinct keys (`my-key` and `myKey`
/// both kebab-case to `my-key`). That is a latent wiring bug, so generation
/// routed through the audit fails instead of silently reusing the output.
#[derive(Debug, Default)]
pub struct NameAudit {
    seen: BTreeMap<(NameKind, String), String>,
}

impl NameAudit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generated output for `key`. Errors when a different key
    /// already produced the same output for the same kind.
    pub fn record(&mut self, kind: NameKind, key: &str, output: &str) -> Result<(), NamingError> {
        match self.seen.get(&(kind, output.to_string())) {
            Some(existing) if existing != key => Err(NamingError::Collision {
                kind,
                key: key.to_string(),
                existing: existing.clone(),
                output: output.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.seen.insert((kind, output.to_string()), key.to_string());
                Ok(())
            }
        }
    }
}
