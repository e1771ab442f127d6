//! Implementation of `wharf build`.
//!
//! A single forward pass: load the configuration, compile the extension,
//! assemble the wheel. The platform descriptor is constructed by the
//! caller and threaded through explicitly, so tests can substitute a
//! fabricated one.

use std::path::Path;

use anyhow::Result;

use crate::builder::{self, BuildMode};
use crate::core::config::ProjectConfig;
use crate::packager::{self, WheelPackage};
use crate::platform::PlatformDescriptor;

/// Options for the build command.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Build with the ReleaseFast profile
    pub release: bool,
}

impl BuildOptions {
    pub fn mode(&self) -> BuildMode {
        if self.release {
            BuildMode::Release
        } else {
            BuildMode::Debug
        }
    }
}

/// Build the project in `project_dir` into a wheel under `dist/`.
///
/// Stages run strictly in order; a failed compile aborts before any
/// packaging work starts.
pub fn build_wheel(
    project_dir: &Path,
    platform: &PlatformDescriptor,
    opts: &BuildOptions,
) -> Result<WheelPackage> {
    let config = ProjectConfig::load(project_dir)?;

    tracing::info!(
        "building {} v{} ({} mode)",
        config.name,
        config.version,
        opts.mode().as_str()
    );
    let artifact = builder::build(project_dir, &config, platform, opts.mode())?;

    let wheel = packager::assemble(project_dir, &config, platform, &artifact)?;
    Ok(wheel)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::errors::Error;
    use crate::platform::{Arch, InterpreterVersion, Os};

    #[test]
    fn test_missing_config_aborts_before_any_stage() {
        let tmp = TempDir::new().unwrap();
        let platform = PlatformDescriptor::fabricated(
            Os::Linux,
            Arch::X86_64,
            InterpreterVersion::new(3, 11, 0),
        );

        let err = build_wheel(tmp.path(), &platform, &BuildOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ConfigNotFound(_))
        ));
        assert!(!tmp.path().join("dist").exists());
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(BuildOptions { release: true }.mode(), BuildMode::Release);
        assert_eq!(BuildOptions { release: false }.mode(), BuildMode::Debug);
    }
}
