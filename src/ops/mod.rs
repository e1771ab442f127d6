//! High-level operations.
//!
//! This module contains the implementation of wharf commands.

pub mod doctor;
pub mod wharf_build;
pub mod wharf_develop;

pub use doctor::{doctor, format_report, DoctorReport};
pub use wharf_build::{build_wheel, BuildOptions};
pub use wharf_develop::develop;
