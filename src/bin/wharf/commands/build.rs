//! `wharf build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use wharf::ops::wharf_build::{build_wheel, BuildOptions};
use wharf::platform::PlatformDescriptor;

pub fn execute(args: BuildArgs) -> Result<()> {
    let project_dir = std::env::current_dir()?;
    let platform = PlatformDescriptor::detect()?;

    let opts = BuildOptions {
        release: args.release,
    };
    let wheel = build_wheel(&project_dir, &platform, &opts)?;

    eprintln!("    Finished {}", wheel.path.display());
    Ok(())
}
