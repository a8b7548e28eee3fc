//! CLI route: resolves the environment, loads config, and dispatches.

use crate::assembly::assemble;
use crate::cli::parse::{Cli, Commands, ConfigCommands};
use crate::config::{ConfigLoader, Environment, EnvironmentName, StrataConfig};
use crate::error::{AssemblyError, ConfigError};
use tracing::info;

/// Runtime context for CLI execution: resolved environment and effective
/// configuration.
pub struct RunContext {
    environment: EnvironmentName,
    config: StrataConfig,
}

impl RunContext {
    pub fn new(cli: &Cli) -> Result<Self, AssemblyError> {
        let raw = match &cli.environment {
            Some(name) => name.clone(),
            None => std::env::var("STRATA_ENVIRONMENT").map_err(|_| {
                ConfigError::Invalid(
                    "environment is required: pass --environment or set STRATA_ENVIRONMENT".into(),
                )
            })?,
        };
        let environment: EnvironmentName = raw.parse().map_err(AssemblyError::Config)?;

        let config = ConfigLoader::load(environment, cli.config.as_deref())?;
        Ok(Self {
            environment,
            config,
        })
    }

    pub fn config(&self) -> &StrataConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, AssemblyError> {
        match command {
            Commands::Synth { output } => self.synth(output.as_deref()),
            Commands::Validate => self.validate(),
            Commands::Config { command } => match command {
                ConfigCommands::Show { format } => self.show_config(format),
            },
        }
    }

    fn synth(&self, output: Option<&std::path::Path>) -> Result<String, AssemblyError> {
        // The bootstrap environment only provisions deployment tooling;
        // there is nothing to assemble.
        if self.environment == EnvironmentName::Bootstrap {
            return Ok("bootstrap environment: nothing to assemble".to_string());
        }

        let environment = Environment::from_process(self.environment)?;
        let topology = assemble(&self.config, environment)?;

        match output {
            Some(dir) => {
                topology.assembly().write_to_dir(dir)?;
                info!(dir = %dir.display(), "templates written");
                Ok(format!(
                    "synthesized {} stacks into {}",
                    topology.assembly().stacks().len(),
                    dir.display()
                ))
            }
            None => {
                let rendered = topology.assembly().render()?;
                serde_json::to_string_pretty(&rendered)
                    .map_err(|e| crate::error::SynthError::Render(e).into())
            }
        }
    }

    fn validate(&self) -> Result<String, AssemblyError> {
        if self.environment == EnvironmentName::Bootstrap {
            return Ok("bootstrap environment: nothing to validate".to_string());
        }

        let environment = Environment::from_process(self.environment)?;
        let topology = assemble(&self.config, environment)?;

        let mut out = String::new();
        out.push_str(&format!(
            "topology ok: {} ({} environment)\n",
            topology.app_name(),
            topology.environment().name
        ));
        for stack in topology.assembly().stacks() {
            out.push_str(&format!(
                "  {} ({} resources)\n",
                stack.id,
                stack.resources.len()
            ));
        }
        Ok(out)
    }

    fn show_config(&self, format: &str) -> Result<String, AssemblyError> {
        match format {
            "toml" => toml::to_string_pretty(&self.config)
                .map_err(|e| ConfigError::Invalid(e.to_string()).into()),
            "json" => serde_json::to_string_pretty(&self.config)
                .map_err(|e| ConfigError::Invalid(e.to_string()).into()),
            other => Err(ConfigError::Invalid(format!(
                "invalid config format: {other} (must be 'toml' or 'json')"
            ))
            .into()),
        }
    }
}
