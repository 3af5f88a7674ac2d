//! Error types for batch conversion

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a conversion run
///
/// Problems inside a single source file never surface here: they are
/// recorded as diagnostics or counted in the run report instead.
#[derive(Error, Debug)]
pub enum IconGenError {
    /// IO error on a specific path
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source root is missing or not a directory
    #[error("source path {0} is not a directory")]
    NotADirectory(PathBuf),

    /// Directory traversal failed
    #[error("failed to walk directory {path}: {source}")]
    WalkDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A walked entry was not below the source root
    #[error("path error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),
}
