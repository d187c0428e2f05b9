//! File-system resource helpers.
use std::fs;
use std::path::Path;

use crate::error::{Result, SyncError};

/// Mode for directories created on unix: `rwxr-xr-x`.
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

/// Ensure `path` exists as a directory, creating it and any missing
/// ancestors.  Does nothing if the directory already exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        builder.mode(DIR_MODE);
    }
    builder
        .create(path)
        .map_err(|e| SyncError::io("create directory", path, e))
}

/// Copy file contents from `from` to `to`, overwriting `to` if present.
///
/// # Errors
///
/// Returns an error if the source cannot be read or the destination cannot
/// be written.
pub fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    fs::copy(from, to).map_err(|e| SyncError::io("copy to", to, e))
}

/// Remove a single file.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| SyncError::io("remove file", path, e))
}

/// Remove a directory and everything below it.  Does nothing if `path`
/// does not exist.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be removed.
pub fn remove_tree(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SyncError::io("remove directory", path, e)),
    }
}

/// Whether the current process may write to `path`.
#[must_use]
pub fn is_writable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use nix::unistd::{AccessFlags, access};
        access(path, AccessFlags::W_OK).is_ok()
    }
    #[cfg(not(unix))]
    {
        fs::metadata(path).is_ok_and(|m| !m.permissions().readonly())
    }
}

/// Whether the current process may read `path`.
#[must_use]
pub fn is_readable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use nix::unistd::{AccessFlags, access};
        access(path, AccessFlags::R_OK).is_ok()
    }
    #[cfg(not(unix))]
    {
        fs::metadata(path).is_ok()
    }
}
