//! Configuration system.
//!
//! Hierarchical configuration: built-in per-environment defaults, an
//! optional global file, an optional workspace file, and `STRATA_`-prefixed
//! environment variable overrides, merged in that order.

pub mod env;
mod loader;
mod service;

pub use env::{Environment, EnvironmentName};
pub use loader::ConfigLoader;
pub use service::{
    EnvValue, HostedZoneConfig, ImageConfig, RegistryConfig, ServiceConfig, VpnCertificates,
    VpnConfig,
};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registry kind accepted by the image-registry stack.
pub const MANAGED_REGISTRY_KIND: &str = "managed";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrataConfig {
    /// Application name; the middle segment of every generated identifier.
    pub app_name: String,

    /// Deployable services.
    pub service: ServicesConfig,

    /// Developer VPN; enabled only when present.
    #[serde(default)]
    pub vpn: Option<VpnConfig>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    pub api: ServiceConfig,
}

impl StrataConfig {
    /// Built-in defaults for one environment: the shared service environment
    /// vocabulary plus environment-derived domain and secret paths.
    pub fn for_environment(env: EnvironmentName) -> Self {
        let mut default_env: BTreeMap<String, EnvValue> = BTreeMap::new();
        default_env.insert("PORT".into(), EnvValue::Integer(80));
        // CORS
        default_env.insert("CORS_ALLOWED_ORIGINS".into(), EnvValue::String("*".into()));
        default_env.insert(
            "CORS_ALLOWED_METHODS".into(),
            EnvValue::String("GET,POST,PUT,PATCH,DELETE,OPTIONS,HEAD".into()),
        );
        default_env.insert(
            "CORS_ALLOWED_HEADERS".into(),
            EnvValue::String("Accept,Authorization,Content-Type,X-CSRF-Token,Origin".into()),
        );
        default_env.insert("CORS_ALLOWED_CREDENTIALS".into(), EnvValue::Bool(true));
        default_env.insert("CORS_MAX_AGE".into(), EnvValue::Integer(300));
        // Sessions
        default_env.insert(
            "SESSION_ACCESS_TOKEN_EXPIRATION".into(),
            EnvValue::String("1h".into()),
        );
        default_env.insert(
            "SESSION_REFRESH_TOKEN_EXPIRATION".into(),
            EnvValue::String("30d".into()),
        );
        // Verification tokens
        default_env.insert(
            "VERIFICATION_USER_PASSWORD_RESET_EXPIRATION".into(),
            EnvValue::String("3d".into()),
        );
        default_env.insert(
            "VERIFICATION_USER_REGISTRATION_EXPIRATION".into(),
            EnvValue::String("7d".into()),
        );
        // Metrics
        default_env.insert("METRICS_PORT".into(), EnvValue::Integer(9178));
        default_env.insert("METRICS_NAMESPACE".into(), EnvValue::String("strata".into()));
        default_env.insert("METRICS_SUBSYSTEM".into(), EnvValue::String("api".into()));
        // Logging
        default_env.insert("LOG_LEVEL".into(), EnvValue::String("debug".into()));

        let mut secrets = BTreeMap::new();
        secrets.insert(
            "AUTH_SECRET".to_string(),
            format!("/example.io/{env}/svc/api/AUTH_SECRET@v1"),
        );
        secrets.insert(
            "HASH_PEPPER".to_string(),
            format!("/example.io/{env}/svc/api/HASH_PEPPER@v1"),
        );

        Self {
            app_name: "Backend".to_string(),
            service: ServicesConfig {
                api: ServiceConfig {
                    env: default_env,
                    secrets,
                    image: ImageConfig {
                        registry: RegistryConfig {
                            kind: MANAGED_REGISTRY_KIND.to_string(),
                            name: "backend/api".to_string(),
                            keep_untagged_images: 5,
                        },
                        tag: "latest".to_string(),
                    },
                    hosted_zone: HostedZoneConfig {
                        id: String::new(),
                        name: format!("{env}.svc.example.io"),
                    },
                    domain: format!("api.{env}.svc.example.io"),
                    public_load_balancer: false,
                },
            },
            vpn: None,
            logging: LoggingConfig::default(),
        }
    }
}
