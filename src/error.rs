//! Error types for the Strata topology assembly system.

use crate::context::Domain;
use crate::naming::NameKind;
use std::path::PathBuf;
use thiserror::Error;

/// Capability registry violations.
///
/// Every variant names the domain so the operator can see which stack was
/// assembled out of order or assembled twice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{0} capability is not bound yet; a stack read it before its producer ran")]
    Unbound(Domain),

    #[error("{0} capability is already bound; a stack attempted to publish it twice")]
    AlreadyBound(Domain),

    #[error("registry is sealed; {0} can no longer be bound")]
    Sealed(Domain),
}

/// Generated-identifier collisions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    #[error("generated {kind} '{output}' for key '{key}' collides with key '{existing}'")]
    Collision {
        kind: NameKind,
        key: String,
        existing: String,
        output: String,
    },
}

/// Namespaced store merge violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("override key '{key}' rebinds physical key '{physical}' owned by logical key '{existing}'")]
    Collision {
        key: String,
        physical: String,
        existing: String,
    },
}

/// Configuration and environment resolution errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown environment name: {0} (expected one of: bootstrap, test, dev, staging, production)")]
    UnknownEnvironment(String),

    #[error("deployment region must be set via STRATA_REGION or CLOUD_REGION")]
    MissingRegion,

    #[error("configuration load failed: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Synthesis collaborator errors.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("duplicate construct id '{0}' within stack '{1}'")]
    DuplicateConstructId(String, String),

    #[error("failed to write template {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template rendering failed: {0}")]
    Render(#[from] serde_json::Error),
}

/// Top-level assembly error.
///
/// All variants are structural configuration-time failures and abort the
/// whole run; there is no retry at this layer.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("{domain} stack: {source}")]
    Stack {
        domain: Domain,
        #[source]
        source: Box<AssemblyError>,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Synth(#[from] SynthError),

    #[error("role '{0}' is not defined")]
    UnknownRole(String),

    #[error("topic '{0}' is not defined")]
    UnknownTopic(String),

    #[error("queue '{0}' is not defined")]
    UnknownQueue(String),

    #[error("unsupported container registry kind: {0}")]
    UnsupportedRegistryKind(String),
}

impl AssemblyError {
    /// Wrap an error with the domain whose stack was being assembled.
    pub fn in_domain(self, domain: Domain) -> AssemblyError {
        AssemblyError::Stack {
            domain,
            source: Box::new(self),
        }
    }
}
