//! Error types for callgrapher.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the library. Per-file parse problems are not errors:
/// they are collected as [`LoadWarning`](crate::loader::LoadWarning)s so a
/// malformed file never aborts a project load.
#[derive(Debug, Error)]
pub enum CallgrapherError {
    /// libclang could not be loaded or initialized.
    #[error("clang front-end unavailable: {0}")]
    FrontEnd(String),

    /// Filesystem failure while enumerating or reading project files.
    #[error("i/o error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A compilation database could not be read or decoded.
    #[error("invalid compilation database {path}: {message}")]
    CompileDb { path: PathBuf, message: String },

    /// A source file referenced by a graph node is no longer readable.
    #[error("source file not readable: {0}")]
    MissingFile(PathBuf),
}

pub type Result<T> = std::result::Result<T, CallgrapherError>;
