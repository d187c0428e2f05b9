//! Domain-specific error types for the copy-mapping engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Library code returns typed errors while the binary converts them to
//! [`anyhow::Error`] at the CLI boundary via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! Rejection  : package-scoped configuration problem, logged and skipped
//! SyncError  : filesystem failure that aborts the whole run
//! HostError  : host adapter failure (reading project metadata)
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for synchronizer operations.
pub type Result<T, E = SyncError> = std::result::Result<T, E>;

/// Reasons a package's mapping is rejected before any copy begins.
///
/// A rejection never crosses package boundaries: the synchronizer logs it at
/// debug level and moves on to the next package.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The destination root does not exist, is not a directory, or is not writable.
    #[error("root directory {} does not exist or is not writable, not copied", .root.display())]
    RootUnusable {
        /// The resolved destination root.
        root: PathBuf,
    },

    /// `copy-mapping-root` is present but is not a non-empty string.
    #[error("copy-mapping-root must be a non-empty string, not copied")]
    RootMalformed,

    /// The package declares no `copy-mapping`, or it is empty.
    #[error("no source and target paths specified, not copied")]
    MappingMissing,

    /// `copy-mapping` is not an object of string values.
    #[error("copy-mapping is malformed ({reason}), not copied")]
    MappingMalformed {
        /// What is wrong with the declared mapping.
        reason: String,
    },

    /// A mapped source path cannot be read.
    #[error("source {} is unreachable, not copied", .path.display())]
    SourceUnreadable {
        /// The resolved source path.
        path: PathBuf,
    },
}

/// Filesystem failures during copy or delete.
///
/// These are not recovered: they propagate out of
/// [`Synchronizer::sync_all`](crate::sync::Synchronizer::sync_all) and
/// [`Synchronizer::remove`](crate::sync::Synchronizer::remove).
#[derive(Error, Debug)]
pub enum SyncError {
    /// A filesystem operation failed.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        /// Short description of the attempted operation (e.g. `"copy to"`).
        action: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Walking a source directory tree failed.
    #[error("walking source tree: {0}")]
    Walk(#[from] walkdir::Error),
}

impl SyncError {
    /// Build an [`SyncError::Io`] from an action label and path.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Errors raised by host adapters while loading project metadata.
#[derive(Error, Debug)]
pub enum HostError {
    /// A metadata file could not be read.
    #[error("IO error reading {}: {source}", .path.display())]
    Read {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A metadata file is not valid JSON of the expected shape.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// The requested package is not installed.
    #[error("package '{0}' is not installed")]
    PackageNotFound(String),
}
