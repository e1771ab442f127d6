//! Implementation of `wharf develop`: build a wheel and install it into
//! the detected interpreter's environment.

use std::path::Path;

use anyhow::{Context, Result};

use crate::ops::wharf_build::{build_wheel, BuildOptions};
use crate::packager::WheelPackage;
use crate::platform::PlatformDescriptor;
use crate::util::process::ProcessBuilder;

/// Build the wheel, then `pip install --force-reinstall` it via the
/// target interpreter.
pub fn develop(
    project_dir: &Path,
    platform: &PlatformDescriptor,
    opts: &BuildOptions,
) -> Result<WheelPackage> {
    let wheel = build_wheel(project_dir, platform, opts)?;

    tracing::info!("installing {}", wheel.filename);
    ProcessBuilder::new(&platform.interpreter)
        .args(["-m", "pip", "install", "--force-reinstall"])
        .arg(&wheel.path)
        .exec_and_check()
        .with_context(|| format!("failed to install {}", wheel.filename))?;

    Ok(wheel)
}
