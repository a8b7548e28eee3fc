//! Opaque handles returned by the synthesis collaborator.
//!
//! These are the values stacks publish behind capability traits. They carry
//! generated names and locators only; no provider identifier syntax is
//! modeled here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleHandle {
    pub construct_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetGroup {
    pub name: String,
    pub kind: SubnetKind,
    pub cidr_mask: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubnetKind {
    Public,
    PrivateWithEgress,
    PrivateIsolated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcHandle {
    pub construct_id: String,
    pub name: String,
    pub cidr: String,
    pub subnet_groups: Vec<SubnetGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterHandle {
    pub construct_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryHandle {
    pub construct_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseHandle {
    pub construct_id: String,
    pub identifier: String,
    pub default_database: String,
    /// Hierarchical path of the generated credentials secret.
    pub secret_path: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicHandle {
    pub construct_id: String,
    pub name: String,
}

impl TopicHandle {
    /// Stable locator injected into service environments.
    pub fn locator(&self) -> String {
        format!("topic/{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueHandle {
    pub construct_id: String,
    pub name: String,
}

impl QueueHandle {
    pub fn locator(&self) -> String {
        format!("queue/{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHandle {
    pub construct_id: String,
    pub name: String,
    pub domain: String,
}

/// A reference to secret material resolved at deploy time, never a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "kebab-case")]
pub enum SecretBinding {
    /// A parameter-store entry, e.g. `/example.io/dev/svc/api/AUTH_SECRET@v1`.
    Parameter { path: String },
    /// A field of a managed database credentials secret.
    DatabaseField { secret_path: String, field: String },
}
