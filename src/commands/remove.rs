//! Command: delete the paths one package's mapping copied.
use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, RemoveOpts};
use crate::host::LifecycleHooks as _;
use crate::logging::Logger;
use crate::sync::Synchronizer;

/// Run the remove command.
///
/// The package must still be listed in `installed.json`, so run this before
/// the package manager drops it.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded, the package is not
/// installed, or an existing destination cannot be removed.
pub fn run(global: &GlobalOpts, opts: &RemoveOpts, log: &Logger) -> Result<()> {
    let project = super::load_project(global, log)?;
    let package = project.find_package(&opts.package)?;

    log.stage(&format!("Removing mappings of {}", package.name));
    Synchronizer::new(&project, log)
        .on_package_removed(package)
        .with_context(|| format!("removing mappings of {}", package.name))?;
    Ok(())
}
