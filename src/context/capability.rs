//! Capability contracts exposed by stacks.
//!
//! Dependents are typed against these traits, never against the concrete
//! stack that produced the capability.

use crate::synth::handles::{
    ClusterHandle, DatabaseHandle, QueueHandle, RepositoryHandle, RoleHandle, ServiceHandle,
    TopicHandle, VpcHandle,
};

/// Identity and access: roles looked up by name.
pub trait IdentityCapability {
    fn role(&self, name: &str) -> Option<&RoleHandle>;
}

/// Network: the virtual network everything else attaches to.
pub trait NetworkCapability {
    fn vpc(&self) -> &VpcHandle;
}

/// Compute cluster hosting container workloads.
pub trait ClusterCapability {
    fn cluster(&self) -> &ClusterHandle;
}

/// Container image registry for the application service.
pub trait ImageRegistryCapability {
    fn repository(&self) -> &RepositoryHandle;
}

/// Relational database cluster.
pub trait DatabaseCapability {
    fn database(&self) -> &DatabaseHandle;
}

/// Messaging topics and queues, looked up by key.
pub trait MessagingCapability {
    fn topic(&self, key: &str) -> Option<&TopicHandle>;
    fn queue(&self, key: &str) -> Option<&QueueHandle>;
}

/// The assembled application service.
pub trait ServiceCapability {
    fn service(&self) -> &ServiceHandle;
}
