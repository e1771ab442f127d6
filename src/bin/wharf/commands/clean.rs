//! `wharf clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use wharf::packager::DIST_DIR;
use wharf::util::fs::remove_dir_all_if_exists;

pub fn execute(args: CleanArgs) -> Result<()> {
    let project_dir = std::env::current_dir()?;

    let scratch = project_dir.join(".wharf");
    remove_dir_all_if_exists(&scratch)?;
    eprintln!("     Removed {}", scratch.display());

    if args.dist {
        let dist = project_dir.join(DIST_DIR);
        remove_dir_all_if_exists(&dist)?;
        eprintln!("     Removed {}", dist.display());
    }

    Ok(())
}
