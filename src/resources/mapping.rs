//! Copy-mapping resource: one `from -> to` pair of one package.
use std::fmt;

use super::fs::{copy_file, ensure_dir, is_writable, remove_file, remove_tree};
use super::plan::{PlannedAction, plan_entry};
use super::{Applicable, ResourceChange};
use crate::config::{CopyEntry, Strategy};
use crate::error::Result;
use crate::logging::Log;

/// A resolved mapping pair that can be copied into place or removed.
pub struct MappingResource<'a> {
    package: &'a str,
    entry: CopyEntry,
    strategy: Strategy,
    log: &'a dyn Log,
}

impl fmt::Debug for MappingResource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingResource")
            .field("package", &self.package)
            .field("entry", &self.entry)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

impl<'a> MappingResource<'a> {
    /// Create a resource for `entry` owned by `package`.
    #[must_use]
    pub fn new(package: &'a str, entry: CopyEntry, strategy: Strategy, log: &'a dyn Log) -> Self {
        Self {
            package,
            entry,
            strategy,
            log,
        }
    }

    fn note(&self, message: &str) {
        self.log.debug(&format!("{message} ({})", self.package));
    }
}

impl Applicable for MappingResource<'_> {
    fn apply(&self) -> Result<ResourceChange> {
        let is_tree = self.entry.source.is_dir();
        let plan = plan_entry(&self.entry, self.strategy)?;

        let mut copied = 0;
        let mut kept = 0;
        for action in &plan {
            match action {
                PlannedAction::CreateDir(path) => ensure_dir(path)?,
                PlannedAction::CopyFile { from, to } => {
                    copy_file(from, to)?;
                    copied += 1;
                }
                PlannedAction::Skip { path, reason } => {
                    kept += 1;
                    self.note(&format!("{} {reason}, not copied", path.display()));
                }
            }
        }

        if is_tree || copied > 0 {
            self.note(&format!(
                "{} copied to {}",
                self.entry.source.display(),
                self.entry.target.display()
            ));
        }
        Ok(ResourceChange::Applied {
            changed: copied,
            kept,
        })
    }

    fn remove(&self) -> Result<ResourceChange> {
        let target = &self.entry.target;
        let Ok(meta) = target.symlink_metadata() else {
            self.note(&format!("{} was deleted", target.display()));
            return Ok(ResourceChange::AlreadyCorrect);
        };

        if meta.is_dir() {
            remove_tree(target)?;
        } else if is_writable(target) {
            remove_file(target)?;
        } else {
            self.note(&format!("{} is not writable, not deleted", target.display()));
            return Ok(ResourceChange::Skipped {
                reason: "not writable".to_string(),
            });
        }
        self.note(&format!("{} was deleted", target.display()));
        Ok(ResourceChange::Applied {
            changed: 1,
            kept: 0,
        })
    }
}
