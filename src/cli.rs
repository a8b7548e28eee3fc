//! CLI domain: parse, route, and output only.
//! No orchestration logic; the route table dispatches to the assembly layer.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands};
pub use route::RunContext;
