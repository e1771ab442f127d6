//! Deterministic ZIP serialization of the staged wheel tree.
//!
//! Entries traverse the staging tree in lexicographic order of their
//! relative path, store that path with forward-slash separators, and carry
//! a fixed timestamp and file mode - so identical inputs always produce a
//! byte-identical archive. Compression is plain deflate; no encryption, no
//! extra fields.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::Error;

/// Serialize every file under `staging` into a ZIP archive at `dest`.
/// An existing archive at `dest` is overwritten.
pub fn write_archive(staging: &Path, dest: &Path) -> Result<()> {
    let mut entries = collect_entries(staging)?;
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let file = File::create(dest).map_err(|e| archive_err(dest, e))?;
    let mut writer = ZipWriter::new(file);

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    for (name, path) in &entries {
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| archive_err(dest, e))?;
        let mut source = File::open(path).map_err(|e| archive_err(path, e))?;
        io::copy(&mut source, &mut writer).map_err(|e| archive_err(path, e))?;
    }

    writer.finish().map_err(|e| archive_err(dest, e))?;
    Ok(())
}

/// Collect (archive name, absolute path) pairs for every file under root.
/// Archive names use forward slashes regardless of host convention.
fn collect_entries(root: &Path) -> Result<Vec<(String, std::path::PathBuf)>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| Error::ArchiveWrite(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| Error::ArchiveWrite(e.to_string()))?;
        let name = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        entries.push((name, entry.path().to_path_buf()));
    }

    Ok(entries)
}

fn archive_err(path: &Path, err: impl std::fmt::Display) -> anyhow::Error {
    Error::ArchiveWrite(format!("{}: {}", path.display(), err)).into()
}
