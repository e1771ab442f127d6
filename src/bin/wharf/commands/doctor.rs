//! `wharf doctor` command

use anyhow::Result;

use crate::cli::DoctorArgs;
use wharf::ops::doctor::{doctor, format_report};

pub fn execute(_args: DoctorArgs) -> Result<()> {
    let report = doctor()?;
    print!("{}", format_report(&report));

    if !report.healthy() {
        std::process::exit(1);
    }
    Ok(())
}
