//! Zig toolchain detection.

use std::path::PathBuf;

use crate::util::process::find_executable;

/// Locate the Zig compiler.
///
/// Tries PATH first, then a short list of common installation locations.
pub fn find_zig() -> Option<PathBuf> {
    if let Some(path) = find_executable("zig") {
        return Some(path);
    }

    for candidate in common_install_paths() {
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    None
}

#[cfg(not(target_os = "windows"))]
fn common_install_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("/usr/local/bin/zig"),
        PathBuf::from("/usr/bin/zig"),
    ];
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        paths.insert(0, home.join(".local/bin/zig"));
        paths.push(home.join(".zig/zig"));
    }
    paths
}

#[cfg(target_os = "windows")]
fn common_install_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for var in ["LOCALAPPDATA", "PROGRAMFILES"] {
        if let Some(base) = std::env::var_os(var) {
            paths.push(PathBuf::from(base).join("zig").join("zig.exe"));
        }
    }
    if let Some(profile) = std::env::var_os("USERPROFILE") {
        paths.push(PathBuf::from(profile).join(".zig").join("zig.exe"));
    }
    paths
}
