//! Defines the custom error type for the `core` module.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for structural traversal failures.
///
/// Both variants are caller-recoverable: the outline renderer turns them
/// into placeholder lines and the row projection silently ends the affected
/// branch. Size aggregation never surfaces them at all.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The directory exists but could not be opened for enumeration.
    #[error("cannot read directory {0}")]
    AccessDenied(PathBuf, #[source] io::Error),

    /// The directory no longer exists at call time.
    #[error("directory not found: {0}")]
    NotFound(PathBuf, #[source] io::Error),
}

impl ScanError {
    /// Classifies an enumeration failure for `path`.
    pub(crate) fn from_io(err: io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound(path.to_path_buf(), err),
            _ => ScanError::AccessDenied(path.to_path_buf(), err),
        }
    }
}
