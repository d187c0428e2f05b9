//! Copy planning: turn one resolved mapping entry into an ordered list of
//! filesystem actions without touching the destination.
use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{CopyEntry, Strategy};
use crate::error::Result;

/// Why a path is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Destination exists and the strategy keeps existing files.
    ExistsSimple,
    /// Source is a symbolic link inside a copied tree.
    Symlink,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExistsSimple => f.write_str("exists and strategy is simple"),
            Self::Symlink => f.write_str("is a symbolic link"),
        }
    }
}

/// One step of a copy plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    /// Create a directory and any missing ancestors.
    CreateDir(PathBuf),
    /// Copy file contents, overwriting the destination.
    CopyFile {
        /// Source file.
        from: PathBuf,
        /// Destination file.
        to: PathBuf,
    },
    /// Leave `path` untouched.
    Skip {
        /// Path that is not written.
        path: PathBuf,
        /// Why it is skipped.
        reason: SkipReason,
    },
}

/// Plan the actions needed to copy `entry` under `strategy`.
///
/// Reads the live filesystem, so call it right before executing the plan.
/// A source that is neither a file nor a directory yields an empty plan.
///
/// # Errors
///
/// Returns an error if the source tree cannot be walked.
pub fn plan_entry(entry: &CopyEntry, strategy: Strategy) -> Result<Vec<PlannedAction>> {
    if entry.source.is_file() {
        return Ok(plan_file(&entry.source, &entry.target, strategy, true));
    }
    if !entry.source.is_dir() {
        return Ok(Vec::new());
    }

    let mut plan = vec![PlannedAction::CreateDir(entry.target.clone())];
    for dent in WalkDir::new(&entry.source).min_depth(1).sort_by_file_name() {
        let dent = dent?;
        let Ok(rel) = dent.path().strip_prefix(&entry.source) else {
            continue;
        };
        let to = entry.target.join(rel);
        let file_type = dent.file_type();
        if file_type.is_symlink() {
            plan.push(PlannedAction::Skip {
                path: to,
                reason: SkipReason::Symlink,
            });
        } else if file_type.is_dir() {
            plan.push(PlannedAction::CreateDir(to));
        } else {
            plan.extend(plan_file(dent.path(), &to, strategy, false));
        }
    }
    Ok(plan)
}

/// Plan a single file copy.  Inside a tree the parent directory is already
/// part of the plan, so `with_parent` is only set for top-level files.
fn plan_file(from: &Path, to: &Path, strategy: Strategy, with_parent: bool) -> Vec<PlannedAction> {
    if strategy == Strategy::Simple && to.exists() {
        return vec![PlannedAction::Skip {
            path: to.to_path_buf(),
            reason: SkipReason::ExistsSimple,
        }];
    }
    let mut actions = Vec::with_capacity(2);
    if with_parent
        && let Some(parent) = to.parent()
        && !parent.as_os_str().is_empty()
    {
        actions.push(PlannedAction::CreateDir(parent.to_path_buf()));
    }
    actions.push(PlannedAction::CopyFile {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
    });
    actions
}

/// Render a plan one action per line, with paths shown relative to `base`
/// where possible.
#[must_use]
pub fn render(plan: &[PlannedAction], base: &Path) -> String {
    let show = |p: &Path| p.strip_prefix(base).unwrap_or(p).display().to_string();
    plan.iter()
        .map(|action| match action {
            PlannedAction::CreateDir(path) => format!("mkdir {}", show(path)),
            PlannedAction::CopyFile { from, to } => format!("copy  {} -> {}", show(from), show(to)),
            PlannedAction::Skip { path, reason } => format!("skip  {} ({reason})", show(path)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
