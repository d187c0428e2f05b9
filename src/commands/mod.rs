//! Subcommand implementations.
pub mod remove;
pub mod sync;
pub mod version;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::composer::ComposerProject;
use crate::host::PackageRegistry as _;
use crate::logging::Logger;

/// Determine the project directory: `--project-dir` if given, otherwise the
/// current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_project_dir(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref dir) = global.project_dir {
        return Ok(dir.clone());
    }
    std::env::current_dir().context("cannot determine project directory")
}

/// Resolve the project directory and load its Composer metadata.
///
/// # Errors
///
/// Returns an error if the project directory cannot be determined or its
/// metadata cannot be read.
pub fn load_project(global: &GlobalOpts, log: &Logger) -> Result<ComposerProject> {
    let dir = resolve_project_dir(global)?;
    log.stage("Loading project");
    let project = ComposerProject::load(&dir)
        .with_context(|| format!("loading project {}", dir.display()))?;
    log.debug(&format!("vendor directory: {}", project.vendor_dir().display()));
    log.debug(&format!(
        "{} installed package(s)",
        project.installed_packages().len()
    ));
    Ok(project)
}
