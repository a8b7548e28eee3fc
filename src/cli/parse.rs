//! CLI parse: clap types for Strata. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strata CLI - deterministic infrastructure topology assembly
#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Assemble infrastructure stacks into a deployable topology")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Target environment (bootstrap, test, dev, staging, production).
    /// Falls back to the STRATA_ENVIRONMENT environment variable.
    #[arg(long)]
    pub environment: Option<String>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble the topology and render stack templates
    Synth {
        /// Write one template file per stack into this directory instead of
        /// printing the assembly to stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Assemble the topology and report the result without rendering
    Validate,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective merged configuration
    Show {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
}
