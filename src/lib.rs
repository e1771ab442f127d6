//! Wharf - a Cargo-like build tool that packages Zig Python extensions
//! into wheels.
//!
//! This crate provides the core library functionality for wharf: project
//! configuration, host/interpreter detection, the Zig compiler driver, and
//! wheel assembly.

pub mod builder;
pub mod core;
pub mod errors;
pub mod ops;
pub mod packager;
pub mod platform;
pub mod util;

pub use core::config::ProjectConfig;
pub use errors::Error;
pub use platform::PlatformDescriptor;
