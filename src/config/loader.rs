//! Layered configuration loading.
//!
//! Precedence, lowest to highest: built-in per-environment defaults, global
//! file (`$XDG_CONFIG_HOME/strata/config.toml`), workspace file
//! (`strata.toml` or an explicit `--config` path), `STRATA__`-prefixed
//! environment variables.

use crate::config::service::EnvValue;
use crate::config::{EnvironmentName, StrataConfig};
use crate::error::ConfigError;
use config::{Config, Environment as EnvSource, File};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the effective configuration for `env`.
    ///
    /// `explicit path` replaces the workspace file lookup; the file must
    /// then exist.
    pub fn load(
        env: EnvironmentName,
        explicit_path: Option<&Path>,
    ) -> Result<StrataConfig, ConfigError> {
        let defaults = StrataConfig::for_environment(env);
        let mut builder = Config::builder().add_source(Config::try_from(&defaults)?);

        // Files in layering order, kept for the map re-merge below.
        let mut files: Vec<PathBuf> = Vec::new();

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                debug!(path = %global.display(), "loading global config");
                builder = builder.add_source(File::from(global.clone()).required(false));
                files.push(global);
            }
        }

        match explicit_path {
            Some(path) => {
                builder = builder.add_source(File::from(path.to_path_buf()).required(true));
                files.push(path.to_path_buf());
            }
            None => {
                builder = builder.add_source(File::with_name("strata").required(false));
                let workspace = PathBuf::from("strata.toml");
                if workspace.exists() {
                    files.push(workspace);
                }
            }
        }

        builder = builder.add_source(EnvSource::with_prefix("STRATA").separator("__"));

        let mut config = builder.build()?.try_deserialize::<StrataConfig>()?;

        // The config crate folds map keys to lowercase, which would corrupt
        // the service vocabulary (PORT, DATABASE_HOST, AUTH_SECRET, ...).
        // Re-merge the env and secret maps from the raw files, case intact.
        let (env_map, secret_map) = Self::merge_service_maps(&defaults, &files)?;
        config.service.api.env = env_map;
        config.service.api.secrets = secret_map;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Path of the user-level config file, when a home directory exists.
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "strata").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Layer the `service.api.env` and `service.api.secrets` tables from the
    /// raw files over the built-in defaults, preserving key case.
    fn merge_service_maps(
        defaults: &StrataConfig,
        files: &[PathBuf],
    ) -> Result<(BTreeMap<String, EnvValue>, BTreeMap<String, String>), ConfigError> {
        let mut env_map = defaults.service.api.env.clone();
        let mut secret_map = defaults.service.api.secrets.clone();

        for path in files {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                ConfigError::Invalid(format!("cannot read {}: {e}", path.display()))
            })?;
            let value: toml::Value = toml::from_str(&raw).map_err(|e| {
                ConfigError::Invalid(format!("cannot parse {}: {e}", path.display()))
            })?;
            let api = value
                .get("service")
                .and_then(|v| v.get("api"))
                .and_then(|v| v.as_table());
            let Some(api) = api else { continue };

            if let Some(env) = api.get("env").and_then(|v| v.as_table()) {
                for (key, raw_value) in env {
                    env_map.insert(key.clone(), Self::env_value(path, key, raw_value)?);
                }
            }
            if let Some(secrets) = api.get("secrets").and_then(|v| v.as_table()) {
                for (key, raw_value) in secrets {
                    let secret = raw_value.as_str().ok_or_else(|| {
                        ConfigError::Invalid(format!(
                            "{}: service.api.secrets.{key} must be a string",
                            path.display()
                        ))
                    })?;
                    secret_map.insert(key.clone(), secret.to_string());
                }
            }
        }

        Ok((env_map, secret_map))
    }

    fn env_value(path: &Path, key: &str, value: &toml::Value) -> Result<EnvValue, ConfigError> {
        match value {
            toml::Value::String(s) => Ok(EnvValue::String(s.clone())),
            toml::Value::Integer(i) => Ok(EnvValue::Integer(*i)),
            toml::Value::Boolean(b) => Ok(EnvValue::Bool(*b)),
            other => Err(ConfigError::Invalid(format!(
                "{}: service.api.env.{key} must be a string, integer, or boolean, got {}",
                path.display(),
                other.type_str()
            ))),
        }
    }

    fn validate(config: &StrataConfig) -> Result<(), ConfigError> {
        if config.app_name.trim().is_empty() {
            return Err(ConfigError::Invalid("app_name must not be empty".into()));
        }
        if config.service.api.domain.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "service.api.domain must not be empty".into(),
            ));
        }
        Ok(())
    }
}
