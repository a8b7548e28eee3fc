//! Strata CLI Binary
//!
//! Command-line interface for the Strata topology assembly system.

use clap::Parser;
use std::process;
use strata::cli::{map_error, Cli, RunContext};
use strata::logging::{init_logging, LoggingConfig};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Create the run context first: logging configuration lives in the
    // effective config.
    let context = match RunContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, context.config().logging.clone());
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(1);
    }

    info!("Strata CLI starting");

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{output}");
        }
        Err(e) => {
            error!("Command failed: {e}");
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// CLI flags override the configured logging settings.
fn build_logging_config(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    if let Some(level) = &cli.log_level {
        config.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.format = format.clone();
    }
    config
}
