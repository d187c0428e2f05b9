//! Interfaces the host package manager implements to drive the synchronizer.
//!
//! The synchronizer never discovers packages or listens for events on its
//! own.  A host integration layer implements [`PackageRegistry`] to expose
//! installed packages and project settings, and calls the
//! [`LifecycleHooks`] methods when its install/update/uninstall steps
//! finish.
use std::path::{Path, PathBuf};

use crate::config::{COPY_MAPPING_KEY, ExtraConfig};
use crate::error::Result;
use crate::sync::SyncSummary;

/// An installed package as reported by the host.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackageDescriptor {
    /// Package name, e.g. `acme/widgets`.  Also the package's directory
    /// relative to the vendor directory.
    pub name: String,
    /// The package's extra configuration block.
    pub extra: ExtraConfig,
}

impl PackageDescriptor {
    /// Create a descriptor from a name and extra configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, extra: ExtraConfig) -> Self {
        Self {
            name: name.into(),
            extra,
        }
    }

    /// Directory the package is installed into.
    #[must_use]
    pub fn install_dir(&self, vendor_dir: &Path) -> PathBuf {
        vendor_dir.join(&self.name)
    }

    /// Whether the package declares a `copy-mapping` entry at all.
    ///
    /// A `null` value counts as not declared.
    #[must_use]
    pub fn declares_copy_mapping(&self) -> bool {
        self.extra
            .get(COPY_MAPPING_KEY)
            .is_some_and(|v| !v.is_null())
    }
}

/// Read-only view of the host's installed packages and project settings.
#[cfg_attr(test, mockall::automock)]
pub trait PackageRegistry {
    /// All installed packages, in the order the host enumerates them.
    fn installed_packages(&self) -> Vec<PackageDescriptor>;

    /// The root project's extra configuration block.
    fn root_extra(&self) -> ExtraConfig;

    /// Base directory under which each package is installed by name.
    fn vendor_dir(&self) -> PathBuf;

    /// Directory that relative `copy-mapping-root` values resolve against.
    fn project_dir(&self) -> PathBuf;
}

/// Lifecycle notifications the host delivers after its own work is done.
pub trait LifecycleHooks {
    /// All packages were installed or updated: copy every declared mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if a filesystem operation fails while copying.
    fn on_packages_updated(&self) -> Result<SyncSummary>;

    /// `package` was uninstalled: delete the paths its mapping copied.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing destination cannot be removed.
    fn on_package_removed(&self, package: &PackageDescriptor) -> Result<()>;
}
