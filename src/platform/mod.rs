//! Host platform and target interpreter detection.
//!
//! The descriptor is built once per invocation and threaded explicitly
//! through the pipeline - there is no process-wide cache, so tests can
//! substitute a fabricated descriptor without touching global state.
//!
//! Host OS and architecture come from compile-time facts. Interpreter facts
//! come from running a short introspection script against the first usable
//! candidate executable; its output is 8 lines, parsed positionally, and any
//! parse failure skips that candidate.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::errors::Error;
use crate::util::process::{find_executable, ProcessBuilder};

/// Supported host operating systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    Windows,
    Macos,
}

impl Os {
    /// Lowercase name as used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Windows => "windows",
            Os::Macos => "macos",
        }
    }

    /// Native shared-library suffix for compiler output.
    pub fn dylib_suffix(&self) -> &'static str {
        match self {
            Os::Linux => ".so",
            Os::Windows => ".dll",
            Os::Macos => ".dylib",
        }
    }
}

/// Supported host CPU architectures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    Aarch64,
    X86,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::X86 => "x86",
        }
    }
}

/// Target interpreter version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterVersion {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
}

impl InterpreterVersion {
    pub fn new(major: u32, minor: u32, micro: u32) -> Self {
        InterpreterVersion {
            major,
            minor,
            micro,
        }
    }
}

impl std::fmt::Display for InterpreterVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

/// Host platform and target interpreter facts needed for a compatible
/// binary wheel. Created once per invocation; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PlatformDescriptor {
    pub os: Os,
    pub arch: Arch,
    pub interpreter_version: InterpreterVersion,

    /// Filename suffix for the installed extension module
    /// (`.pyd` on Windows, `EXT_SUFFIX` elsewhere).
    pub extension_suffix: String,

    /// The interpreter's purelib installation directory.
    pub purelib_dir: PathBuf,

    /// The interpreter's own executable path.
    pub interpreter: PathBuf,

    /// C header include directory.
    pub include_dir: PathBuf,

    /// Library directory, with a platform default substituted when the
    /// interpreter reports none.
    pub lib_dir: PathBuf,
}

/// Inline script run against each candidate interpreter. Prints exactly 8
/// lines in fixed order: major, minor, micro, extension suffix, purelib,
/// executable, include dir, lib dir.
const INTROSPECT_SCRIPT: &str = "\
import sys, sysconfig
print(sys.version_info.major)
print(sys.version_info.minor)
print(sys.version_info.micro)
print(sysconfig.get_config_var('EXT_SUFFIX') or '.so')
print(sysconfig.get_paths()['purelib'])
print(sys.executable)
print(sysconfig.get_paths()['include'])
print(sysconfig.get_config_var('LIBDIR') or '')
";

impl PlatformDescriptor {
    /// Detect the host platform and locate a usable target interpreter.
    pub fn detect() -> Result<Self> {
        let os = host_os()?;
        let arch = host_arch()?;

        for &candidate in interpreter_candidates(os) {
            let Some(path) = find_executable(candidate) else {
                continue;
            };

            let output = match ProcessBuilder::new(&path)
                .arg("-c")
                .arg(INTROSPECT_SCRIPT)
                .exec()
            {
                Ok(output) if output.status.success() => output,
                _ => {
                    tracing::debug!("interpreter candidate `{candidate}` failed to launch");
                    continue;
                }
            };

            let stdout = String::from_utf8_lossy(&output.stdout);
            match parse_introspection(os, arch, &stdout) {
                Some(descriptor) => {
                    tracing::debug!(
                        "using interpreter {} ({})",
                        descriptor.interpreter.display(),
                        descriptor.interpreter_version
                    );
                    return Ok(descriptor);
                }
                None => {
                    tracing::debug!(
                        "interpreter candidate `{candidate}` produced unparseable output"
                    );
                }
            }
        }

        Err(Error::InterpreterNotFound.into())
    }

    /// Build a descriptor from fabricated facts. Used by tests and by
    /// callers that already know the interpreter layout.
    pub fn fabricated(os: Os, arch: Arch, version: InterpreterVersion) -> Self {
        let extension_suffix = match os {
            Os::Windows => ".pyd".to_string(),
            _ => ".so".to_string(),
        };
        PlatformDescriptor {
            os,
            arch,
            interpreter_version: version,
            extension_suffix,
            purelib_dir: PathBuf::from("/usr/lib/python3/site-packages"),
            interpreter: PathBuf::from("/usr/bin/python3"),
            include_dir: PathBuf::from("/usr/include/python3"),
            lib_dir: PathBuf::from("/usr/lib"),
        }
    }
}

/// Resolve the host OS from compile-time platform facts.
fn host_os() -> Result<Os> {
    if cfg!(target_os = "linux") {
        Ok(Os::Linux)
    } else if cfg!(target_os = "windows") {
        Ok(Os::Windows)
    } else if cfg!(target_os = "macos") {
        Ok(Os::Macos)
    } else {
        Err(unsupported_platform())
    }
}

/// Resolve the host CPU architecture from compile-time platform facts.
fn host_arch() -> Result<Arch> {
    if cfg!(target_arch = "x86_64") {
        Ok(Arch::X86_64)
    } else if cfg!(target_arch = "aarch64") {
        Ok(Arch::Aarch64)
    } else if cfg!(target_arch = "x86") {
        Ok(Arch::X86)
    } else {
        Err(unsupported_platform())
    }
}

fn unsupported_platform() -> anyhow::Error {
    Error::UnsupportedPlatform {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    }
    .into()
}

/// Candidate executable names, tried in order.
fn interpreter_candidates(os: Os) -> &'static [&'static str] {
    match os {
        Os::Windows => &["python", "python3", "py"],
        _ => &["python3", "python"],
    }
}

/// Parse the introspection script's 8-line output positionally.
///
/// Returns `None` on any field failing to parse, which makes the caller
/// skip this candidate and try the next one.
fn parse_introspection(os: Os, arch: Arch, stdout: &str) -> Option<PlatformDescriptor> {
    let lines: Vec<&str> = stdout.lines().map(str::trim).collect();
    if lines.len() < 8 {
        return None;
    }

    let major: u32 = lines[0].parse().ok()?;
    let minor: u32 = lines[1].parse().ok()?;
    let micro: u32 = lines[2].parse().ok()?;

    let suffix = lines[3];
    let purelib = lines[4];
    let executable = lines[5];
    let include = lines[6];
    let libdir = lines[7];

    if suffix.is_empty() || purelib.is_empty() || executable.is_empty() || include.is_empty() {
        return None;
    }

    let interpreter = PathBuf::from(executable);

    // Windows installs extension modules as `.pyd` regardless of what the
    // generic shared-object suffix says.
    let extension_suffix = if os == Os::Windows {
        ".pyd".to_string()
    } else {
        suffix.to_string()
    };

    let lib_dir = if libdir.is_empty() {
        default_lib_dir(os, &interpreter)
    } else {
        PathBuf::from(libdir)
    };

    Some(PlatformDescriptor {
        os,
        arch,
        interpreter_version: InterpreterVersion::new(major, minor, micro),
        extension_suffix,
        purelib_dir: PathBuf::from(purelib),
        interpreter,
        include_dir: PathBuf::from(include),
        lib_dir,
    })
}

/// Fallback library directory when the interpreter reports none.
///
/// CPython on Windows has no LIBDIR config var; its import libraries live
/// in `libs/` next to the executable.
fn default_lib_dir(os: Os, interpreter: &Path) -> PathBuf {
    match os {
        Os::Windows => interpreter
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("libs"),
        _ => PathBuf::from("/usr/lib"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
3
11
4
.cpython-311-x86_64-linux-gnu.so
/usr/lib/python3.11/site-packages
/usr/bin/python3.11
/usr/include/python3.11
/usr/lib
";

    #[test]
    fn test_parse_introspection_all_fields() {
        let p = parse_introspection(Os::Linux, Arch::X86_64, SAMPLE).unwrap();
        assert_eq!(p.interpreter_version, InterpreterVersion::new(3, 11, 4));
        assert_eq!(p.extension_suffix, ".cpython-311-x86_64-linux-gnu.so");
        assert_eq!(
            p.purelib_dir,
            PathBuf::from("/usr/lib/python3.11/site-packages")
        );
        assert_eq!(p.interpreter, PathBuf::from("/usr/bin/python3.11"));
        assert_eq!(p.include_dir, PathBuf::from("/usr/include/python3.11"));
        assert_eq!(p.lib_dir, PathBuf::from("/usr/lib"));
    }

    #[test]
    fn test_parse_introspection_rejects_short_output() {
        assert!(parse_introspection(Os::Linux, Arch::X86_64, "3\n11\n").is_none());
    }

    #[test]
    fn test_parse_introspection_rejects_non_numeric_version() {
        let text = SAMPLE.replacen('3', "three", 1);
        assert!(parse_introspection(Os::Linux, Arch::X86_64, &text).is_none());
    }

    #[test]
    fn test_windows_extension_suffix_is_pyd() {
        let text = SAMPLE.replace("/usr/lib\n", "\n");
        let text = text.replace("/usr/bin/python3.11", r"C:\Python311\python.exe");
        let p = parse_introspection(Os::Windows, Arch::X86_64, &text).unwrap();
        assert_eq!(p.extension_suffix, ".pyd");
    }

    #[test]
    fn test_windows_lib_dir_falls_back_to_libs() {
        let text = SAMPLE.replace("/usr/bin/python3.11", r"C:\Python311\python.exe");
        let text = text.replace("/usr/lib\n", "\n");
        let p = parse_introspection(Os::Windows, Arch::X86_64, &text).unwrap();
        assert!(p.lib_dir.ends_with("libs"));
    }

    #[test]
    fn test_unix_lib_dir_falls_back_to_usr_lib() {
        let text = SAMPLE.replace("/usr/lib\n", "\n");
        let p = parse_introspection(Os::Linux, Arch::X86_64, &text).unwrap();
        assert_eq!(p.lib_dir, PathBuf::from("/usr/lib"));
    }

    #[test]
    fn test_os_and_arch_names() {
        assert_eq!(Os::Linux.as_str(), "linux");
        assert_eq!(Os::Windows.as_str(), "windows");
        assert_eq!(Os::Macos.as_str(), "macos");
        assert_eq!(Arch::X86_64.as_str(), "x86_64");
        assert_eq!(Arch::Aarch64.as_str(), "aarch64");
        assert_eq!(Arch::X86.as_str(), "x86");
    }

    #[test]
    fn test_dylib_suffix_per_os() {
        assert_eq!(Os::Linux.dylib_suffix(), ".so");
        assert_eq!(Os::Windows.dylib_suffix(), ".dll");
        assert_eq!(Os::Macos.dylib_suffix(), ".dylib");
    }
}
