//! Environment health checks.
//!
//! The `doctor` command verifies that the external tools the pipeline
//! depends on are available: the Zig compiler and a usable Python
//! interpreter. It also reports the wheel tags a build would produce,
//! which is the fastest way to diagnose a "pip refuses my wheel" report.

use std::path::PathBuf;

use anyhow::Result;

use crate::builder::find_zig;
use crate::core::tags;
use crate::platform::PlatformDescriptor;

/// Result of a single health check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Path to the tool (if applicable)
    pub path: Option<PathBuf>,
}

impl CheckResult {
    fn pass(name: &str, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.to_string(),
            passed: true,
            message: message.into(),
            path: None,
        }
    }

    fn fail(name: &str, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.to_string(),
            passed: false,
            message: message.into(),
            path: None,
        }
    }

    fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }
}

/// All check results for one doctor run.
#[derive(Debug, Clone)]
pub struct DoctorReport {
    pub checks: Vec<CheckResult>,
}

impl DoctorReport {
    /// Whether every check passed.
    pub fn healthy(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

/// Run all environment checks.
pub fn doctor() -> Result<DoctorReport> {
    let mut checks = Vec::new();

    match find_zig() {
        Some(path) => {
            checks.push(CheckResult::pass("zig", "compiler found").with_path(path));
        }
        None => {
            checks.push(CheckResult::fail(
                "zig",
                "not found; install from https://ziglang.org/download/",
            ));
        }
    }

    match PlatformDescriptor::detect() {
        Ok(platform) => {
            checks.push(CheckResult::pass(
                "host",
                format!("{}/{}", platform.os.as_str(), platform.arch.as_str()),
            ));
            checks.push(
                CheckResult::pass(
                    "python",
                    format!("interpreter {}", platform.interpreter_version),
                )
                .with_path(platform.interpreter.clone()),
            );
            checks.push(CheckResult::pass(
                "tags",
                format!(
                    "{} / {}",
                    tags::abi_tag(&platform),
                    tags::platform_tag(&platform)
                ),
            ));
        }
        Err(e) => {
            checks.push(CheckResult::fail("python", format!("{e:#}")));
        }
    }

    Ok(DoctorReport { checks })
}

/// Format the report for terminal output.
pub fn format_report(report: &DoctorReport) -> String {
    let mut out = String::new();

    for check in &report.checks {
        let status = if check.passed { "ok" } else { "FAIL" };
        out.push_str(&format!("{:>6}  {:<8} {}", status, check.name, check.message));
        if let Some(ref path) = check.path {
            out.push_str(&format!(" ({})", path.display()));
        }
        out.push('\n');
    }

    if report.healthy() {
        out.push_str("\nenvironment looks good\n");
    } else {
        out.push_str("\nsome checks failed; builds will not succeed until they are fixed\n");
    }

    out
}
