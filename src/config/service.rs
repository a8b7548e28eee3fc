//! Service, image, and VPN configuration shapes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A value allowed in service environment configuration. Rendered to a
/// string before it reaches the container definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    String(String),
    Integer(i64),
    Bool(bool),
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::String(s) => write!(f, "{s}"),
            EnvValue::Integer(i) => write!(f, "{i}"),
            EnvValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// One deployable service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Environment variable overrides, merged over the default vocabulary.
    #[serde(default)]
    pub env: BTreeMap<String, EnvValue>,

    /// Secret references: logical key -> parameter store path.
    #[serde(default)]
    pub secrets: BTreeMap<String, String>,

    pub image: ImageConfig,

    /// Public DNS name of the service.
    pub domain: String,

    pub hosted_zone: HostedZoneConfig,

    /// Expose the load balancer publicly. Defaults to false.
    #[serde(default)]
    pub public_load_balancer: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    pub registry: RegistryConfig,
    pub tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry kind; only "managed" is supported.
    pub kind: String,
    /// Repository name within the registry.
    pub name: String,
    /// Untagged images retained by the lifecycle rule.
    #[serde(default = "default_keep_untagged")]
    pub keep_untagged_images: u32,
}

fn default_keep_untagged() -> u32 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedZoneConfig {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

/// Developer VPN, attached to the network stack when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpnConfig {
    pub certificate: VpnCertificates,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpnCertificates {
    pub server_ref: String,
    pub client_ref: String,
}
