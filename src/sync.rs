//! Mapping synchronizer: copy every declared mapping, or remove one
//! package's copies.
use std::fmt;
use std::path::Path;

use crate::config::validation::validate_sources;
use crate::config::{CopyEntry, EffectiveConfig, ExtraConfig};
use crate::error::{Rejection, Result};
use crate::host::{LifecycleHooks, PackageDescriptor, PackageRegistry};
use crate::logging::Log;
use crate::resources::Applicable as _;
use crate::resources::mapping::MappingResource;

/// Counters collected over one [`Synchronizer::sync_all`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Packages whose mapping was copied.
    pub packages_synced: usize,
    /// Packages skipped because their configuration was rejected.
    pub packages_rejected: usize,
    /// Files written to the destination.
    pub files_copied: usize,
    /// Existing destination files kept by the `simple` strategy.
    pub files_kept: usize,
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} package(s) synced, {} skipped, {} file(s) copied, {} kept",
            self.packages_synced, self.packages_rejected, self.files_copied, self.files_kept
        )
    }
}

/// Copies and removes package mappings for the packages a
/// [`PackageRegistry`] reports.
pub struct Synchronizer<'a, R: PackageRegistry + ?Sized> {
    registry: &'a R,
    log: &'a dyn Log,
}

impl<R: PackageRegistry + ?Sized> fmt::Debug for Synchronizer<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Synchronizer").finish_non_exhaustive()
    }
}

impl<'a, R: PackageRegistry + ?Sized> Synchronizer<'a, R> {
    /// Create a synchronizer over `registry`, logging to `log`.
    #[must_use]
    pub fn new(registry: &'a R, log: &'a dyn Log) -> Self {
        Self { registry, log }
    }

    /// Copy the mapping of every installed package that declares one.
    ///
    /// Packages are processed in registry order.  A package whose
    /// configuration is rejected is logged once at debug level and skipped;
    /// the run continues with the next package.
    ///
    /// # Errors
    ///
    /// Returns the first filesystem error; packages after it are not
    /// processed and nothing already copied is rolled back.
    pub fn sync_all(&self) -> Result<SyncSummary> {
        let root_extra = self.registry.root_extra();
        let vendor_dir = self.registry.vendor_dir();
        let project_dir = self.registry.project_dir();

        let mut summary = SyncSummary::default();
        let packages = self.registry.installed_packages();
        for package in packages.iter().filter(|p| p.declares_copy_mapping()) {
            let (config, entries) =
                match resolve_copy(package, &root_extra, &vendor_dir, &project_dir) {
                    Ok(resolved) => resolved,
                    Err(rejection) => {
                        self.log.debug(&format!("{rejection} ({})", package.name));
                        summary.packages_rejected += 1;
                        continue;
                    }
                };

            for entry in entries {
                let change =
                    MappingResource::new(&package.name, entry, config.strategy, self.log).apply()?;
                summary.files_copied += change.changed();
                summary.files_kept += change.kept();
            }
            summary.packages_synced += 1;
        }
        Ok(summary)
    }

    /// Delete the destination paths `package`'s mapping copied.
    ///
    /// Only targets are touched; nothing under the vendor directory is read.
    /// A pair whose target is the destination root itself is logged and
    /// left alone.  Removing a package twice is a no-op the second time.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing destination cannot be removed.
    pub fn remove(&self, package: &PackageDescriptor) -> Result<()> {
        let config = EffectiveConfig::for_removal(package, &self.registry.root_extra());
        if config.mapping.is_empty() {
            self.log.debug(&format!("nothing to delete ({})", package.name));
            return Ok(());
        }

        let install_dir = package.install_dir(&self.registry.vendor_dir());
        let project_dir = self.registry.project_dir();
        let root = config.destination_root(&project_dir);
        for entry in config.copy_entries(&install_dir, &project_dir) {
            if entry.target == root {
                self.log.debug(&format!(
                    "{} is the destination root, not deleted ({})",
                    root.display(),
                    package.name
                ));
                continue;
            }
            MappingResource::new(&package.name, entry, config.strategy, self.log).remove()?;
        }
        Ok(())
    }
}

impl<R: PackageRegistry + ?Sized> LifecycleHooks for Synchronizer<'_, R> {
    fn on_packages_updated(&self) -> Result<SyncSummary> {
        self.sync_all()
    }

    fn on_package_removed(&self, package: &PackageDescriptor) -> Result<()> {
        self.remove(package)
    }
}

/// Resolve and validate everything needed to copy `package`.
fn resolve_copy(
    package: &PackageDescriptor,
    root_extra: &ExtraConfig,
    vendor_dir: &Path,
    project_dir: &Path,
) -> Result<(EffectiveConfig, Vec<CopyEntry>), Rejection> {
    let config = EffectiveConfig::for_copy(package, root_extra, project_dir)?;
    let entries = config.copy_entries(&package.install_dir(vendor_dir), project_dir);
    validate_sources(&entries)?;
    Ok((config, entries))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::host::MockPackageRegistry;
    use crate::logging::{BufferedLog, Level};
    use serde_json::{Value, json};
    use std::fs;
    use std::path::PathBuf;

    fn package(name: &str, extra: Value) -> PackageDescriptor {
        PackageDescriptor::new(name, extra.as_object().cloned().unwrap())
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn registry(project: &Path, packages: Vec<PackageDescriptor>) -> MockPackageRegistry {
        let mut mock = MockPackageRegistry::new();
        mock.expect_installed_packages()
            .returning(move || packages.clone());
        mock.expect_root_extra().return_const(ExtraConfig::new());
        mock.expect_vendor_dir().return_const(project.join("vendor"));
        mock.expect_project_dir().return_const(project.to_path_buf());
        mock
    }

    // -----------------------------------------------------------------------
    // sync_all
    // -----------------------------------------------------------------------

    #[test]
    fn packages_without_mapping_are_ignored_silently() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(dir.path(), vec![package("acme/plain", json!({ "foo": 1 }))]);
        let log = BufferedLog::new();

        let summary = Synchronizer::new(&reg, &log).sync_all().unwrap();

        assert_eq!(summary, SyncSummary::default());
        assert!(log.entries().is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn rejected_package_logs_once_and_run_continues() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("vendor/acme/good/a.txt"), "good");
        let reg = registry(
            dir.path(),
            vec![
                package(
                    "acme/bad",
                    json!({ "copy-mapping": { "a.txt": "a.txt" }, "copy-mapping-root": "missing/" }),
                ),
                package("acme/good", json!({ "copy-mapping": { "a.txt": "b.txt" } })),
            ],
        );
        let log = BufferedLog::new();

        let summary = Synchronizer::new(&reg, &log).sync_all().unwrap();

        assert_eq!(summary.packages_rejected, 1);
        assert_eq!(summary.packages_synced, 1);
        assert_eq!(summary.files_copied, 1);
        let lines = log.messages(Level::Debug);
        let rejected: Vec<_> = lines.iter().filter(|l| l.ends_with("(acme/bad)")).collect();
        assert_eq!(rejected.len(), 1);
        assert!(rejected[0].contains("does not exist or is not writable"));
        assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "good");
    }

    #[test]
    fn unreadable_source_rejects_whole_package() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("vendor/acme/x/a.txt"), "a");
        let reg = registry(
            dir.path(),
            vec![package(
                "acme/x",
                json!({ "copy-mapping": { "a.txt": "out/a.txt", "gone.txt": "out/gone.txt" } }),
            )],
        );
        let log = BufferedLog::new();

        let summary = Synchronizer::new(&reg, &log).sync_all().unwrap();

        assert_eq!(summary.packages_rejected, 1);
        assert!(!dir.path().join("out").exists());
        let lines = log.messages(Level::Debug);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("gone.txt is unreachable"));
    }

    #[test]
    fn summary_counts_kept_files() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("vendor/acme/x/a.txt"), "new");
        write(&dir.path().join("a.txt"), "old");
        let reg = registry(
            dir.path(),
            vec![package("acme/x", json!({ "copy-mapping": { "a.txt": "a.txt" } }))],
        );
        let log = BufferedLog::new();

        let summary = Synchronizer::new(&reg, &log).sync_all().unwrap();

        assert_eq!(
            summary,
            SyncSummary {
                packages_synced: 1,
                packages_rejected: 0,
                files_copied: 0,
                files_kept: 1,
            }
        );
    }

    #[test]
    fn io_failure_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("vendor/acme/x/assets/a.css"), "a");
        // the tree target exists as a file, so the directory cannot be created
        write(&dir.path().join("public"), "not a directory");
        let reg = registry(
            dir.path(),
            vec![package("acme/x", json!({ "copy-mapping": { "assets": "public" } }))],
        );
        let log = BufferedLog::new();

        let err = Synchronizer::new(&reg, &log).sync_all().unwrap_err();

        assert!(err.to_string().contains("create directory"));
    }

    // -----------------------------------------------------------------------
    // remove
    // -----------------------------------------------------------------------

    #[test]
    fn remove_without_mapping_logs_nothing_to_delete() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(dir.path(), vec![]);
        let log = BufferedLog::new();

        Synchronizer::new(&reg, &log)
            .remove(&package("acme/x", json!({})))
            .unwrap();

        assert_eq!(
            log.messages(Level::Debug),
            vec!["nothing to delete (acme/x)".to_string()]
        );
    }

    #[test]
    fn remove_uses_targets_only() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("dest/a.txt"), "copied");
        let reg = registry(dir.path(), vec![]);
        let log = BufferedLog::new();

        Synchronizer::new(&reg, &log)
            .remove(&package(
                "acme/x",
                json!({ "copy-mapping": { "src/a.txt": "dest/a.txt" } }),
            ))
            .unwrap();

        assert!(!dir.path().join("dest/a.txt").exists());
    }

    #[test]
    fn remove_never_deletes_destination_root() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("index.php"), "<?php");
        write(&dir.path().join("dest/a.txt"), "copied");
        let reg = registry(dir.path(), vec![]);
        let log = BufferedLog::new();

        Synchronizer::new(&reg, &log)
            .remove(&package(
                "acme/x",
                json!({ "copy-mapping": { "all": "", "again": "./", "a.txt": "dest/a.txt" } }),
            ))
            .unwrap();

        assert!(dir.path().join("index.php").exists());
        assert!(!dir.path().join("dest/a.txt").exists());
        let lines = log.messages(Level::Debug);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("is the destination root, not deleted"));
        assert!(lines[1].contains("is the destination root, not deleted"));
        assert!(lines[2].contains("was deleted"));
    }

    // -----------------------------------------------------------------------
    // lifecycle hooks
    // -----------------------------------------------------------------------

    #[test]
    fn hooks_delegate_to_synchronizer() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("vendor/acme/x/a.txt"), "a");
        let pkg = package("acme/x", json!({ "copy-mapping": { "a.txt": "copied.txt" } }));
        let reg = registry(dir.path(), vec![pkg.clone()]);
        let log = BufferedLog::new();
        let hooks: &dyn LifecycleHooks = &Synchronizer::new(&reg, &log);

        let summary = hooks.on_packages_updated().unwrap();
        assert_eq!(summary.files_copied, 1);
        assert!(dir.path().join("copied.txt").exists());

        hooks.on_package_removed(&pkg).unwrap();
        assert!(!dir.path().join("copied.txt").exists());
    }

    #[test]
    fn summary_display() {
        let summary = SyncSummary {
            packages_synced: 2,
            packages_rejected: 1,
            files_copied: 5,
            files_kept: 3,
        };
        assert_eq!(
            summary.to_string(),
            "2 package(s) synced, 1 skipped, 5 file(s) copied, 3 kept"
        );
    }

    #[test]
    fn debug_does_not_require_debug_registry() {
        let reg = registry(&PathBuf::from("/nonexistent"), vec![]);
        let log = BufferedLog::new();
        let sync = Synchronizer::new(&reg, &log);
        assert!(format!("{sync:?}").starts_with("Synchronizer"));
    }
}
