//! Wheel compatibility tag derivation.
//!
//! Pure functions of a [`PlatformDescriptor`] - no I/O, so identical input
//! always yields identical tag strings. The wheel filename repeats the ABI
//! tag in the interpreter-tag slot; wharf does not track a separate
//! interpreter tag, and the doubled tag is a compatibility-sensitive part
//! of the output filename.

use crate::platform::{Arch, Os, PlatformDescriptor};

/// ABI tag for the target interpreter, e.g. `cp311`.
pub fn abi_tag(platform: &PlatformDescriptor) -> String {
    format!(
        "cp{}{}",
        platform.interpreter_version.major, platform.interpreter_version.minor
    )
}

/// Platform tag for the host, e.g. `manylinux_2_17_x86_64`.
pub fn platform_tag(platform: &PlatformDescriptor) -> String {
    let arch = wheel_arch(platform.arch);
    match platform.os {
        Os::Linux => format!("manylinux_2_17_{arch}"),
        Os::Macos => format!("macosx_11_0_{arch}"),
        Os::Windows => {
            if platform.arch == Arch::X86 {
                "win32".to_string()
            } else {
                "win_amd64".to_string()
            }
        }
    }
}

/// The full `Tag:` value written into the WHEEL file and embedded in the
/// archive filename.
pub fn wheel_tag(platform: &PlatformDescriptor) -> String {
    let abi = abi_tag(platform);
    format!("{abi}-{abi}-{}", platform_tag(platform))
}

/// Architecture name as it appears in wheel tags.
fn wheel_arch(arch: Arch) -> &'static str {
    match arch {
        Arch::X86_64 => "x86_64",
        Arch::Aarch64 => "aarch64",
        Arch::X86 => "i686",
    }
}
