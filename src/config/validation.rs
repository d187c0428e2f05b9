//! Filesystem preconditions checked before a package's mapping is copied.
//!
//! Validation is all-or-nothing: the first failing check rejects the whole
//! package, so a package is never partially copied because one of its
//! sources was missing.
use std::path::Path;

use super::CopyEntry;
use crate::error::Rejection;
use crate::resources::fs::{is_readable, is_writable};

/// Check that `root` is an existing, writable directory.
///
/// # Errors
///
/// Returns [`Rejection::RootUnusable`] otherwise.
pub fn validate_root(root: &Path) -> Result<(), Rejection> {
    if root.is_dir() && is_writable(root) {
        Ok(())
    } else {
        Err(Rejection::RootUnusable {
            root: root.to_path_buf(),
        })
    }
}

/// Check that every entry's source can be read.
///
/// # Errors
///
/// Returns [`Rejection::SourceUnreadable`] for the first entry whose source
/// cannot be read.
pub fn validate_sources(entries: &[CopyEntry]) -> Result<(), Rejection> {
    match entries.iter().find(|e| !is_readable(&e.source)) {
        Some(entry) => Err(Rejection::SourceUnreadable {
            path: entry.source.clone(),
        }),
        None => Ok(()),
    }
}
