//! Command: copy the mappings of every installed package.
use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::host::LifecycleHooks as _;
use crate::logging::Logger;
use crate::sync::Synchronizer;

/// Run the sync command.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or a copy fails.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let project = super::load_project(global, log)?;

    log.stage("Copying package mappings");
    let summary = Synchronizer::new(&project, log)
        .on_packages_updated()
        .context("copying package mappings")?;
    log.info(&summary.to_string());
    Ok(())
}
