//! Error taxonomy for the build-and-package pipeline.
//!
//! Every failure aborts the current invocation; there is no retry or local
//! recovery. Operations return `anyhow::Result` so callers get context
//! chains, but the root cause is always one of these variants and can be
//! recovered with `err.downcast_ref::<Error>()`.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The project configuration file is missing or unreadable.
    #[error(
        "pyproject.toml not found in {0}\n\
         help: run wharf from the project root, or create a pyproject.toml"
    )]
    ConfigNotFound(PathBuf),

    /// Host OS or CPU architecture is outside the supported enumeration.
    #[error("unsupported host platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// No usable Python interpreter was located on the search path.
    #[error(
        "no usable Python interpreter found\n\
         help: install Python 3 and ensure `python3` (or `python`) is on PATH"
    )]
    InterpreterNotFound,

    /// The Zig compiler could not be located.
    #[error(
        "zig compiler not found\n\
         help: install Zig and ensure `zig` is on PATH \
         (https://ziglang.org/download/)"
    )]
    ToolchainNotFound,

    /// The compiler exited non-zero; `diagnostics` is its stderr, verbatim.
    #[error("zig compilation failed:\n{diagnostics}")]
    BuildFailed { diagnostics: String },

    /// Filesystem or serialization fault while staging or writing the wheel.
    #[error("failed to write wheel archive: {0}")]
    ArchiveWrite(String),
}
