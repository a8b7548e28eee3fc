//! Integration tests for the Strata topology assembly system

mod assembly_flow;
mod config_loading;
mod naming_determinism;
mod namespace_scoping;
