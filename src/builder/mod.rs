//! Zig compiler driver.
//!
//! Compiles the project's Zig entry point into a position-independent
//! shared library with a single `zig build-lib` invocation. One attempt per
//! build - on a non-zero exit the compiler's stderr is surfaced verbatim
//! and the pipeline aborts.

pub mod toolchain;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::config::ProjectConfig;
use crate::errors::Error;
use crate::platform::PlatformDescriptor;
use crate::util::fs::ensure_dir;
use crate::util::process::ProcessBuilder;

pub use toolchain::find_zig;

/// Build-scratch directory, relative to the project root.
pub const BUILD_SCRATCH_DIR: &str = ".wharf/build";

/// Optimization profile for a single build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// The value passed to `zig build-lib -O`.
    pub fn as_zig_flag(&self) -> &'static str {
        match self {
            BuildMode::Debug => "Debug",
            BuildMode::Release => "ReleaseFast",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
        }
    }
}

/// A compiled shared library, plus the mode used to produce it.
#[derive(Debug, Clone)]
pub struct BuildArtifact {
    /// Path to the shared library in the build-scratch directory.
    pub path: PathBuf,

    /// Optimization profile used.
    pub mode: BuildMode,
}

/// Compile the configured Zig entry point into a shared library.
pub fn build(
    project_dir: &Path,
    config: &ProjectConfig,
    platform: &PlatformDescriptor,
    mode: BuildMode,
) -> Result<BuildArtifact> {
    let zig = find_zig().ok_or(Error::ToolchainNotFound)?;

    let scratch = project_dir.join(BUILD_SCRATCH_DIR);
    ensure_dir(&scratch)?;

    let output = scratch.join(format!(
        "_{}_ext{}",
        config.module_name(),
        platform.os.dylib_suffix()
    ));
    let entry = project_dir.join(&config.source_entry);

    let cmd = ProcessBuilder::new(&zig)
        .arg("build-lib")
        .arg(&entry)
        .arg("-dynamic")
        .arg("-fPIC")
        .args(["-O", mode.as_zig_flag()])
        .arg(format!("-femit-bin={}", output.display()))
        .cwd(project_dir);

    tracing::debug!("running: {}", cmd.display_command());
    let result = cmd.exec()?;

    if !result.status.success() {
        return Err(Error::BuildFailed {
            diagnostics: String::from_utf8_lossy(&result.stderr).into_owned(),
        }
        .into());
    }

    // A zero exit does not guarantee the compiler honored -femit-bin.
    if !output.exists() {
        return Err(Error::BuildFailed {
            diagnostics: format!(
                "compilation completed but output file not found: {}",
                output.display()
            ),
        }
        .into());
    }

    tracing::info!("compiled {} -> {}", entry.display(), output.display());
    Ok(BuildArtifact { path: output, mode })
}
