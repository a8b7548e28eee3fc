//! Strata: Deterministic Infrastructure Topology Assembly
//!
//! Assembles mutually dependent infrastructure stacks into a single
//! deployable topology: a write-once capability registry enforces build
//! order, a deterministic name generator produces collision-free
//! environment-scoped identifiers, and namespaced key-value stores compose
//! service environments without prefix collisions.

pub mod assembly;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod naming;
pub mod namespace;
pub mod stack;
pub mod synth;
