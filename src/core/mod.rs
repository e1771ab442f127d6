//! Core data structures for wharf.
//!
//! - Project configuration (the pyproject.toml snapshot)
//! - Wheel compatibility tag derivation

pub mod config;
pub mod tags;

pub use config::{ArgSpec, FunctionSpec, ProjectConfig};
