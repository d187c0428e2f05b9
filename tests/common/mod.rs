// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed project with a vendor directory and
// a fluent builder, so each integration test can lay out installed packages
// and pre-existing destination files without repeating filesystem
// boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use copy_mapping::config::ExtraConfig;
use copy_mapping::error::Result;
use copy_mapping::host::{PackageDescriptor, PackageRegistry};
use copy_mapping::logging::{BufferedLog, Level};
use copy_mapping::sync::{SyncSummary, Synchronizer};
use serde_json::Value;

/// Write `content` to `path`, creating missing parent directories.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}

/// Convert a `json!` object literal into an [`ExtraConfig`].
pub fn extra(value: Value) -> ExtraConfig {
    value.as_object().cloned().expect("extra must be a JSON object")
}

/// Every file below `root`, relative to it, sorted.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .expect("under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

/// An isolated project backed by a [`tempfile::TempDir`] that also acts as
/// the package registry.
///
/// The directory is automatically deleted when dropped.
pub struct ProjectFixture {
    /// Temporary project directory.
    pub root: tempfile::TempDir,
    root_extra: ExtraConfig,
    packages: Vec<PackageDescriptor>,
}

impl ProjectFixture {
    /// Path to the project directory.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of `rel` inside the project.
    pub fn join(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Read a project file as a string.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.join(rel)).expect("read project file")
    }

    /// Look up a registered package by name.
    pub fn package(&self, name: &str) -> PackageDescriptor {
        self.packages
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .expect("package registered")
    }

    /// Run a full sync, returning its summary and the captured log.
    pub fn sync(&self) -> (Result<SyncSummary>, BufferedLog) {
        let log = BufferedLog::new();
        let result = Synchronizer::new(self, &log).sync_all();
        (result, log)
    }

    /// Remove one package's copies, returning the captured log.
    pub fn remove(&self, name: &str) -> (Result<()>, BufferedLog) {
        let log = BufferedLog::new();
        let result = Synchronizer::new(self, &log).remove(&self.package(name));
        (result, log)
    }

    /// Debug lines of `log` that mention `package`.
    pub fn lines_for(log: &BufferedLog, package: &str) -> Vec<String> {
        let suffix = format!("({package})");
        log.messages(Level::Debug)
            .into_iter()
            .filter(|l| l.ends_with(&suffix))
            .collect()
    }
}

impl PackageRegistry for ProjectFixture {
    fn installed_packages(&self) -> Vec<PackageDescriptor> {
        self.packages.clone()
    }

    fn root_extra(&self) -> ExtraConfig {
        self.root_extra.clone()
    }

    fn vendor_dir(&self) -> PathBuf {
        self.root.path().join("vendor")
    }

    fn project_dir(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }
}

/// Fluent builder for [`ProjectFixture`].
pub struct FixtureBuilder {
    fixture: ProjectFixture,
}

impl FixtureBuilder {
    /// Begin building an empty project with no installed packages.
    pub fn new() -> Self {
        Self {
            fixture: ProjectFixture {
                root: tempfile::tempdir().expect("create temp dir"),
                root_extra: ExtraConfig::new(),
                packages: Vec::new(),
            },
        }
    }

    /// Set the root project's extra configuration.
    pub fn root_extra(mut self, value: Value) -> Self {
        self.fixture.root_extra = extra(value);
        self
    }

    /// Register an installed package with the given extra configuration.
    pub fn package(mut self, name: &str, value: Value) -> Self {
        self.fixture
            .packages
            .push(PackageDescriptor::new(name, extra(value)));
        self
    }

    /// Create a file inside `vendor/<package>/`.
    pub fn vendor_file(self, package: &str, rel: &str, content: &str) -> Self {
        let path = self
            .fixture
            .root
            .path()
            .join("vendor")
            .join(package)
            .join(rel);
        write_file(&path, content);
        self
    }

    /// Create a file in the project directory.
    pub fn project_file(self, rel: &str, content: &str) -> Self {
        write_file(&self.fixture.root.path().join(rel), content);
        self
    }

    /// Finish building and return the configured fixture.
    pub fn build(self) -> ProjectFixture {
        self.fixture
    }
}
