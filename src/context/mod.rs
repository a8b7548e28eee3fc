//! Assembly context: the shared coordination object handed to every stack.
//!
//! Owns the capability registry, the name generator, and the collision
//! audit. Passed `&mut` into each stack constructor in strict assembly
//! order; never shared across threads.

pub mod capability;
pub mod registry;

pub use capability::{
    ClusterCapability, DatabaseCapability, IdentityCapability, ImageRegistryCapability,
    MessagingCapability, NetworkCapability, ServiceCapability,
};
pub use registry::{CapabilityRegistry, Domain};

use crate::config::env::Environment;
use crate::error::{NamingError, RegistryError};
use crate::naming::{NameAudit, NameGenerator, NameKind};

pub struct Context {
    app_name: String,
    environment: Environment,
    names: NameGenerator,
    audit: NameAudit,
    registry: CapabilityRegistry,
}

impl Context {
    pub fn new(app_name: impl Into<String>, environment: Environment) -> Self {
        let app_name = app_name.into();
        let names = NameGenerator::new(app_name.clone(), environment.name.to_string());
        Self {
            app_name,
            environment,
            names,
            audit: NameAudit::new(),
            registry: CapabilityRegistry::new(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CapabilityRegistry {
        &mut self.registry
    }

    // ---- audited name derivation ----

    /// Construct identifier for `key`, checked against prior generations.
    pub fn resource_id(&mut self, key: &str) -> Result<String, NamingError> {
        let id = self.names.generate_id(key);
        self.audit.record(NameKind::Id, key, &id)?;
        Ok(id)
    }

    /// Resource name for `key`, checked against prior generations.
    pub fn resource_name(&mut self, key: &str) -> Result<String, NamingError> {
        let name = self.names.generate_name(key);
        self.audit.record(NameKind::Name, key, &name)?;
        Ok(name)
    }

    /// Hierarchical secret/parameter path for `key`.
    pub fn secret_path(&mut self, key: &str) -> Result<String, NamingError> {
        let path = self.names.generate_path(key);
        self.audit.record(NameKind::Path, key, &path)?;
        Ok(path)
    }

    // ---- registry access ----

    pub fn identity(&self) -> Result<&dyn IdentityCapability, RegistryError> {
        self.registry.identity()
    }

    pub fn network(&self) -> Result<&dyn NetworkCapability, RegistryError> {
        self.registry.network()
    }

    pub fn cluster(&self) -> Result<&dyn ClusterCapability, RegistryError> {
        self.registry.cluster()
    }

    pub fn image_registry(&self) -> Result<&dyn ImageRegistryCapability, RegistryError> {
        self.registry.image_registry()
    }

    pub fn database(&self) -> Result<&dyn DatabaseCapability, RegistryError> {
        self.registry.database()
    }

    pub fn messaging(&self) -> Result<&dyn MessagingCapability, RegistryError> {
        self.registry.messaging()
    }

    pub fn service(&self) -> Result<&dyn ServiceCapability, RegistryError> {
        self.registry.service()
    }

    /// Freeze the registry once assembly is complete.
    pub fn seal(&mut self) {
        self.registry.seal();
    }
}
