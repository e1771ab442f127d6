//! dist-info metadata file rendering.
//!
//! Downstream installers validate these files byte-for-byte, so the
//! content is a fixed key-value block per file, nothing optional appended.

use crate::core::config::ProjectConfig;

/// Generator name written into the WHEEL file.
pub const GENERATOR: &str = "wharf";

/// Render the METADATA file.
pub fn render_metadata(config: &ProjectConfig) -> String {
    format!(
        "Metadata-Version: 2.1\n\
         Name: {}\n\
         Version: {}\n\
         Summary: {}\n\
         License: {}\n\
         Requires-Python: {}\n",
        config.name, config.version, config.description, config.license, config.requires_python
    )
}

/// Render the WHEEL file. `tag` is the full `{abi}-{abi}-{platform}` tag.
pub fn render_wheel(tag: &str) -> String {
    format!(
        "Wheel-Version: 1.0\n\
         Generator: {GENERATOR}\n\
         Root-Is-Purelib: false\n\
         Tag: {tag}\n"
    )
}

/// Render the RECORD file.
///
/// Emitted empty; the installer populates it at install time.
pub fn render_record() -> String {
    String::new()
}

/// Render top_level.txt: the importable package name plus a newline.
pub fn render_top_level(module_name: &str) -> String {
    format!("{module_name}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn demo_config() -> ProjectConfig {
        ProjectConfig::parse(
            "[project]\n\
             name = \"demo\"\n\
             version = \"0.1.0\"\n\
             description = \"A demo extension\"\n\
             license = \"MIT\"\n\
             requires-python = \">=3.9\"\n",
            Path::new("/tmp/demo"),
        )
    }

    #[test]
    fn test_metadata_block_is_exact() {
        let expected = "Metadata-Version: 2.1\n\
                        Name: demo\n\
                        Version: 0.1.0\n\
                        Summary: A demo extension\n\
                        License: MIT\n\
                        Requires-Python: >=3.9\n";
        assert_eq!(render_metadata(&demo_config()), expected);
    }

    #[test]
    fn test_wheel_block_is_exact() {
        let expected = "Wheel-Version: 1.0\n\
                        Generator: wharf\n\
                        Root-Is-Purelib: false\n\
                        Tag: cp311-cp311-manylinux_2_17_x86_64\n";
        assert_eq!(render_wheel("cp311-cp311-manylinux_2_17_x86_64"), expected);
    }

    #[test]
    fn test_record_is_empty() {
        assert_eq!(render_record(), "");
    }

    #[test]
    fn test_top_level_ends_with_newline() {
        assert_eq!(render_top_level("demo"), "demo\n");
    }
}
