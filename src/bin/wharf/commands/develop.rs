//! `wharf develop` command

use anyhow::Result;

use crate::cli::DevelopArgs;
use wharf::ops::wharf_build::BuildOptions;
use wharf::ops::wharf_develop::develop;
use wharf::platform::PlatformDescriptor;

pub fn execute(args: DevelopArgs) -> Result<()> {
    let project_dir = std::env::current_dir()?;
    let platform = PlatformDescriptor::detect()?;

    let opts = BuildOptions {
        release: args.release,
    };
    let wheel = develop(&project_dir, &platform, &opts)?;

    eprintln!("   Installed {}", wheel.filename);
    Ok(())
}
