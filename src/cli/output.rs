//! CLI output: operator-facing error presentation.

use crate::error::AssemblyError;

/// Map an assembly error to an operator-facing message.
///
/// Registry violations are programmer errors in the assembly order; the
/// message says so instead of suggesting a configuration fix.
pub fn map_error(err: &AssemblyError) -> String {
    match err {
        AssemblyError::Stack { domain, source } => match source.as_ref() {
            AssemblyError::Registry(registry_err) => format!(
                "error: assembly failed in the {domain} stack: {registry_err}\n\
                 This indicates a bug in the stack build order, not a configuration problem."
            ),
            other => format!("error: assembly failed in the {domain} stack: {other}"),
        },
        AssemblyError::Config(config_err) => format!("error: {config_err}"),
        other => format!("error: {other}"),
    }
}
