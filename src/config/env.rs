//! Deployment environments.
//!
//! The environment name is a closed set; region and account are resolved
//! from the execution environment at construction time. A missing region is
//! a hard failure, a missing account is allowed (environment-agnostic
//! deployment).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentName {
    /// Used only for bootstrapping deployment tooling; never assembled.
    Bootstrap,
    /// Used only by CI pipelines.
    Test,
    Dev,
    Staging,
    Production,
}

impl EnvironmentName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentName::Bootstrap => "bootstrap",
            EnvironmentName::Test => "test",
            EnvironmentName::Dev => "dev",
            EnvironmentName::Staging => "staging",
            EnvironmentName::Production => "production",
        }
    }
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnvironmentName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bootstrap" => Ok(EnvironmentName::Bootstrap),
            "test" => Ok(EnvironmentName::Test),
            "dev" => Ok(EnvironmentName::Dev),
            "staging" => Ok(EnvironmentName::Staging),
            "production" => Ok(EnvironmentName::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// A fully resolved deployment target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub name: EnvironmentName,
    pub region: String,
    pub account: Option<String>,
}

impl Environment {
    /// Resolve region and account from the process environment.
    ///
    /// Region: `STRATA_REGION`, falling back to `CLOUD_REGION`.
    /// Account: `STRATA_ACCOUNT_ID`, falling back to `CLOUD_ACCOUNT_ID`.
    pub fn from_process(name: EnvironmentName) -> Result<Self, ConfigError> {
        let vars: BTreeMap<String, String> = std::env::vars().collect();
        Self::resolve(name, &vars)
    }

    /// Resolve from an explicit variable map. Used by `from_process` and by
    /// tests that must not touch the process environment.
    pub fn resolve(
        name: EnvironmentName,
        vars: &BTreeMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let region = lookup(vars, "STRATA_REGION")
            .or_else(|| lookup(vars, "CLOUD_REGION"))
            .ok_or(ConfigError::MissingRegion)?;

        // An empty account string must not override the absent default.
        let account = lookup(vars, "STRATA_ACCOUNT_ID").or_else(|| lookup(vars, "CLOUD_ACCOUNT_ID"));

        Ok(Self {
            name,
            region,
            account,
        })
    }
}

fn lookup(vars: &BTreeMap<String, String>, key: &str) -> Option<String> {
    vars.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
