//! Wheel assembly.
//!
//! Stages the package directory layout in a scratch tree, writes the
//! dist-info metadata files, and serializes everything into a wheel under
//! `dist/`. The scratch tree is a `TempDir`, so cleanup runs on every exit
//! path including errors.

pub mod archive;
pub mod metadata;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

use crate::builder::BuildArtifact;
use crate::core::config::ProjectConfig;
use crate::core::tags;
use crate::errors::Error;
use crate::platform::PlatformDescriptor;
use crate::util::fs::glob_files;

/// Output directory for finished wheels, relative to the project root.
pub const DIST_DIR: &str = "dist";

/// A finished wheel archive.
#[derive(Debug, Clone)]
pub struct WheelPackage {
    /// Absolute path of the archive under `dist/`.
    pub path: PathBuf,

    /// The archive filename, `{name}-{version}-{tag}.whl`.
    pub filename: String,
}

/// Compute the wheel filename for this config/platform pair.
///
/// The interpreter-tag slot repeats the ABI tag; wharf tracks no separate
/// interpreter tag, and the doubled tag is preserved as documented output.
pub fn wheel_filename(config: &ProjectConfig, platform: &PlatformDescriptor) -> String {
    format!(
        "{}-{}-{}.whl",
        config.name,
        config.version,
        tags::wheel_tag(platform)
    )
}

/// Stage and serialize the wheel for a finished build artifact.
///
/// A pre-existing wheel at the destination path is overwritten; prior
/// archives are never merged.
pub fn assemble(
    project_dir: &Path,
    config: &ProjectConfig,
    platform: &PlatformDescriptor,
    artifact: &BuildArtifact,
) -> Result<WheelPackage> {
    let filename = wheel_filename(config, platform);
    let dist_dir = project_dir.join(DIST_DIR);
    crate::util::fs::ensure_dir(&dist_dir)?;
    let dest = dist_dir.join(&filename);

    // Scratch tree; dropped (and deleted) on every exit path below.
    let staging = TempDir::new().map_err(|e| Error::ArchiveWrite(e.to_string()))?;

    stage_package_dir(staging.path(), project_dir, config, platform, artifact)?;
    stage_dist_info(staging.path(), config, platform)?;

    archive::write_archive(staging.path(), &dest)?;

    tracing::info!("assembled {}", dest.display());
    Ok(WheelPackage {
        path: dest,
        filename,
    })
}

/// Stage `{module}/`: the package's own Python sources (single level, no
/// recursion) plus the compiled extension module.
fn stage_package_dir(
    staging: &Path,
    project_dir: &Path,
    config: &ProjectConfig,
    platform: &PlatformDescriptor,
    artifact: &BuildArtifact,
) -> Result<()> {
    let module = config.module_name();
    let pkg_dir = staging.join(&module);
    fs::create_dir_all(&pkg_dir).map_err(|e| Error::ArchiveWrite(e.to_string()))?;

    // Missing Python sources are tolerated; an empty package is still a
    // valid wheel and the extension module alone may be the whole package.
    let source_pkg = project_dir.join(&module);
    if source_pkg.is_dir() {
        for file in glob_files(&source_pkg, &["*.py", "*.pyi"])? {
            let Some(name) = file.file_name() else {
                continue;
            };
            fs::copy(&file, pkg_dir.join(name))
                .map_err(|e| Error::ArchiveWrite(format!("{}: {}", file.display(), e)))?;
        }
    } else {
        tracing::warn!(
            "package directory {} not found; producing an empty package",
            source_pkg.display()
        );
    }

    let ext_name = format!("_{}_ext{}", module, platform.extension_suffix);
    fs::copy(&artifact.path, pkg_dir.join(ext_name))
        .map_err(|e| Error::ArchiveWrite(format!("{}: {}", artifact.path.display(), e)))?;

    Ok(())
}

/// Stage `{name}-{version}.dist-info/` with its four fixed files.
fn stage_dist_info(
    staging: &Path,
    config: &ProjectConfig,
    platform: &PlatformDescriptor,
) -> Result<()> {
    let dist_info = staging.join(format!("{}-{}.dist-info", config.name, config.version));
    fs::create_dir_all(&dist_info).map_err(|e| Error::ArchiveWrite(e.to_string()))?;

    let tag = tags::wheel_tag(platform);
    let files = [
        ("METADATA", metadata::render_metadata(config)),
        ("WHEEL", metadata::render_wheel(&tag)),
        ("RECORD", metadata::render_record()),
        ("top_level.txt", metadata::render_top_level(&config.module_name())),
    ];

    for (name, content) in files {
        fs::write(dist_info.join(name), content)
            .map_err(|e| Error::ArchiveWrite(format!("{name}: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Read;

    use tempfile::TempDir;

    use crate::builder::BuildMode;
    use crate::platform::{Arch, InterpreterVersion, Os};

    fn linux_py311() -> PlatformDescriptor {
        PlatformDescriptor::fabricated(Os::Linux, Arch::X86_64, InterpreterVersion::new(3, 11, 4))
    }

    fn demo_project(tmp: &TempDir) -> (PathBuf, ProjectConfig, BuildArtifact) {
        let project = tmp.path().join("demo");
        fs::create_dir_all(project.join("demo")).unwrap();
        fs::write(project.join("demo/__init__.py"), "# generated bindings\n").unwrap();
        fs::write(
            project.join("pyproject.toml"),
            "[project]\nname = \"demo\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();

        let config = ProjectConfig::load(&project).unwrap();

        let lib = project.join("_demo_ext.so");
        fs::write(&lib, b"\x7fELF fake shared object").unwrap();
        let artifact = BuildArtifact {
            path: lib,
            mode: BuildMode::Release,
        };

        (project, config, artifact)
    }

    fn read_entry(path: &Path, name: &str) -> String {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut content = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn test_scenario_demo_wheel_filename() {
        let tmp = TempDir::new().unwrap();
        let (project, config, artifact) = demo_project(&tmp);

        let wheel = assemble(&project, &config, &linux_py311(), &artifact).unwrap();

        assert_eq!(
            wheel.filename,
            "demo-0.1.0-cp311-cp311-manylinux_2_17_x86_64.whl"
        );
        assert!(wheel.path.exists());
        assert!(wheel.path.starts_with(project.join("dist")));
    }

    #[test]
    fn test_wheel_contains_package_and_dist_info() {
        let tmp = TempDir::new().unwrap();
        let (project, config, artifact) = demo_project(&tmp);

        let wheel = assemble(&project, &config, &linux_py311(), &artifact).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&wheel.path).unwrap()).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "demo-0.1.0.dist-info/METADATA",
                "demo-0.1.0.dist-info/RECORD",
                "demo-0.1.0.dist-info/WHEEL",
                "demo-0.1.0.dist-info/top_level.txt",
                "demo/__init__.py",
                "demo/_demo_ext.so",
            ]
        );
    }

    #[test]
    fn test_dist_info_contents() {
        let tmp = TempDir::new().unwrap();
        let (project, config, artifact) = demo_project(&tmp);

        let wheel = assemble(&project, &config, &linux_py311(), &artifact).unwrap();

        assert_eq!(read_entry(&wheel.path, "demo-0.1.0.dist-info/RECORD"), "");
        assert_eq!(
            read_entry(&wheel.path, "demo-0.1.0.dist-info/top_level.txt"),
            "demo\n"
        );
        let wheel_file = read_entry(&wheel.path, "demo-0.1.0.dist-info/WHEEL");
        assert!(wheel_file.contains("Tag: cp311-cp311-manylinux_2_17_x86_64\n"));
        let meta = read_entry(&wheel.path, "demo-0.1.0.dist-info/METADATA");
        assert!(meta.starts_with("Metadata-Version: 2.1\nName: demo\nVersion: 0.1.0\n"));
    }

    #[test]
    fn test_assemble_twice_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let (project, config, artifact) = demo_project(&tmp);
        let platform = linux_py311();

        let first = assemble(&project, &config, &platform, &artifact).unwrap();
        let bytes_first = fs::read(&first.path).unwrap();
        let second = assemble(&project, &config, &platform, &artifact).unwrap();
        let bytes_second = fs::read(&second.path).unwrap();

        assert_eq!(first.path, second.path);
        assert_eq!(bytes_first, bytes_second);
    }

    #[test]
    fn test_missing_package_dir_produces_empty_package() {
        let tmp = TempDir::new().unwrap();
        let (project, config, artifact) = demo_project(&tmp);
        fs::remove_dir_all(project.join("demo")).unwrap();

        let wheel = assemble(&project, &config, &linux_py311(), &artifact).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&wheel.path).unwrap()).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert!(names.contains(&"demo/_demo_ext.so".to_string()));
        assert!(!names.contains(&"demo/__init__.py".to_string()));
    }

    #[test]
    fn test_extension_module_uses_interpreter_suffix() {
        let tmp = TempDir::new().unwrap();
        let (project, config, artifact) = demo_project(&tmp);

        let mut platform = linux_py311();
        platform.extension_suffix = ".cpython-311-x86_64-linux-gnu.so".to_string();

        let wheel = assemble(&project, &config, &platform, &artifact).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&wheel.path).unwrap()).unwrap();
        assert!(archive
            .by_name("demo/_demo_ext.cpython-311-x86_64-linux-gnu.so")
            .is_ok());
    }
}
