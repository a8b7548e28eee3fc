//! Write-once capability registry.
//!
//! One typed slot per capability domain. Slots are written exactly once by
//! the stack owning the domain and read any number of times afterwards.
//! Out-of-order or duplicate access fails immediately instead of leaking a
//! corrupted cross-stack reference into the synthesized topology.

use crate::context::capability::{
    ClusterCapability, DatabaseCapability, IdentityCapability, ImageRegistryCapability,
    MessagingCapability, NetworkCapability, ServiceCapability,
};
use crate::error::RegistryError;
use std::fmt;

/// Capability domains, in assembly order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Domain {
    Identity,
    Network,
    Cluster,
    ImageRegistry,
    Database,
    Messaging,
    Service,
}

impl Domain {
    /// All domains in the strict assembly order.
    pub const ORDERED: [Domain; 7] = [
        Domain::Identity,
        Domain::Network,
        Domain::Cluster,
        Domain::ImageRegistry,
        Domain::Database,
        Domain::Messaging,
        Domain::Service,
    ];
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Domain::Identity => "identity",
            Domain::Network => "network",
            Domain::Cluster => "cluster",
            Domain::ImageRegistry => "image-registry",
            Domain::Database => "database",
            Domain::Messaging => "messaging",
            Domain::Service => "service",
        };
        write!(f, "{name}")
    }
}

/// A single write-once binding. No unbind or rebind exists.
struct Slot<T> {
    value: Option<T>,
}

// Derived `Default` would demand `T: Default`, which trait objects cannot
// satisfy; an empty slot needs no default value.
impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> Slot<T> {
    fn bind(&mut self, domain: Domain, value: T, sealed: bool) -> Result<(), RegistryError> {
        if sealed {
            return Err(RegistryError::Sealed(domain));
        }
        if self.value.is_some() {
            return Err(RegistryError::AlreadyBound(domain));
        }
        self.value = Some(value);
        Ok(())
    }

    fn get(&self, domain: Domain) -> Result<&T, RegistryError> {
        self.value.as_ref().ok_or(RegistryError::Unbound(domain))
    }

    fn is_bound(&self) -> bool {
        self.value.is_some()
    }
}

/// The registry itself: one slot per domain plus the sealed flag.
///
/// Mutated by exactly one writer per slot during assembly; `seal` makes the
/// write side permanently unavailable once the topology is complete.
#[derive(Default)]
pub struct CapabilityRegistry {
    identity: Slot<Box<dyn IdentityCapability>>,
    network: Slot<Box<dyn NetworkCapability>>,
    cluster: Slot<Box<dyn ClusterCapability>>,
    image_registry: Slot<Box<dyn ImageRegistryCapability>>,
    database: Slot<Box<dyn DatabaseCapability>>,
    messaging: Slot<Box<dyn MessagingCapability>>,
    service: Slot<Box<dyn ServiceCapability>>,
    sealed: bool,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Result<&dyn IdentityCapability, RegistryError> {
        self.identity.get(Domain::Identity).map(|b| b.as_ref())
    }

    pub fn bind_identity(&mut self, cap: Box<dyn IdentityCapability>) -> Result<(), RegistryError> {
        self.identity.bind(Domain::Identity, cap, self.sealed)
    }

    pub fn network(&self) -> Result<&dyn NetworkCapability, RegistryError> {
        self.network.get(Domain::Network).map(|b| b.as_ref())
    }

    pub fn bind_network(&mut self, cap: Box<dyn NetworkCapability>) -> Result<(), RegistryError> {
        self.network.bind(Domain::Network, cap, self.sealed)
    }

    pub fn cluster(&self) -> Result<&dyn ClusterCapability, RegistryError> {
        self.cluster.get(Domain::Cluster).map(|b| b.as_ref())
    }

    pub fn bind_cluster(&mut self, cap: Box<dyn ClusterCapability>) -> Result<(), RegistryError> {
        self.cluster.bind(Domain::Cluster, cap, self.sealed)
    }

    pub fn image_registry(&self) -> Result<&dyn ImageRegistryCapability, RegistryError> {
        self.image_registry
            .get(Domain::ImageRegistry)
            .map(|b| b.as_ref())
    }

    pub fn bind_image_registry(
        &mut self,
        cap: Box<dyn ImageRegistryCapability>,
    ) -> Result<(), RegistryError> {
        self.image_registry.bind(Domain::ImageRegistry, cap, self.sealed)
    }

    pub fn database(&self) -> Result<&dyn DatabaseCapability, RegistryError> {
        self.database.get(Domain::Database).map(|b| b.as_ref())
    }

    pub fn bind_database(&mut self, cap: Box<dyn DatabaseCapability>) -> Result<(), RegistryError> {
        self.database.bind(Domain::Database, cap, self.sealed)
    }

    pub fn messaging(&self) -> Result<&dyn MessagingCapability, RegistryError> {
        self.messaging.get(Domain::Messaging).map(|b| b.as_ref())
    }

    pub fn bind_messaging(
        &mut self,
        cap: Box<dyn MessagingCapability>,
    ) -> Result<(), RegistryError> {
        self.messaging.bind(Domain::Messaging, cap, self.sealed)
    }

    pub fn service(&self) -> Result<&dyn ServiceCapability, RegistryError> {
        self.service.get(Domain::Service).map(|b| b.as_ref())
    }

    pub fn bind_service(&mut self, cap: Box<dyn ServiceCapability>) -> Result<(), RegistryError> {
        self.service.bind(Domain::Service, cap, self.sealed)
    }

    /// Whether a domain's slot has been written.
    pub fn is_bound(&self, domain: Domain) -> bool {
        match domain {
            Domain::Identity => self.identity.is_bound(),
            Domain::Network => self.network.is_bound(),
            Domain::Cluster => self.cluster.is_bound(),
            Domain::ImageRegistry => self.image_registry.is_bound(),
            Domain::Database => self.database.is_bound(),
            Domain::Messaging => self.messaging.is_bound(),
            Domain::Service => self.service.is_bound(),
        }
    }

    /// Freeze the registry. Reads stay available; any further bind fails.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}
