//! Package registry backed by a Composer project on disk.
//!
//! Reads the root `composer.json` for the project's `extra` block and vendor
//! directory, and `<vendor>/composer/installed.json` for the installed
//! packages.  Both the Composer 2 (`{"packages": [...]}`) and Composer 1
//! (`[...]`) layouts of `installed.json` are accepted.
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::ExtraConfig;
use crate::error::HostError;
use crate::host::{PackageDescriptor, PackageRegistry};

/// Vendor directory used when `config.vendor-dir` is not set.
pub const DEFAULT_VENDOR_DIR: &str = "vendor";

#[derive(Debug, Default, Deserialize)]
struct ComposerJson {
    #[serde(default, deserialize_with = "lenient_extra")]
    extra: ExtraConfig,
    #[serde(default)]
    config: ComposerConfig,
}

#[derive(Debug, Default, Deserialize)]
struct ComposerConfig {
    #[serde(rename = "vendor-dir")]
    vendor_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstalledJson {
    V2 { packages: Vec<InstalledPackage> },
    V1(Vec<InstalledPackage>),
}

impl InstalledJson {
    fn into_packages(self) -> Vec<InstalledPackage> {
        match self {
            Self::V2 { packages } | Self::V1(packages) => packages,
        }
    }
}

#[derive(Debug, Deserialize)]
struct InstalledPackage {
    name: String,
    #[serde(default, deserialize_with = "lenient_extra")]
    extra: ExtraConfig,
}

/// Accept any JSON value for `extra`; anything but an object reads as empty.
fn lenient_extra<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ExtraConfig, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => ExtraConfig::new(),
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, HostError> {
    let content = fs::read_to_string(path).map_err(|source| HostError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| HostError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// A Composer project loaded from disk.
#[derive(Debug, Clone)]
pub struct ComposerProject {
    project_dir: PathBuf,
    vendor_dir: PathBuf,
    root_extra: ExtraConfig,
    packages: Vec<PackageDescriptor>,
}

impl ComposerProject {
    /// Load the project rooted at `project_dir`.
    ///
    /// A missing `installed.json` means nothing is installed yet.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Read`] if `composer.json` (or an existing
    /// `installed.json`) cannot be read, and [`HostError::Parse`] if either
    /// file is not valid JSON of the expected shape.
    pub fn load(project_dir: &Path) -> Result<Self, HostError> {
        let manifest: ComposerJson = read_json(&project_dir.join("composer.json"))?;
        let vendor_dir = project_dir.join(
            manifest
                .config
                .vendor_dir
                .as_deref()
                .unwrap_or(DEFAULT_VENDOR_DIR),
        );

        let installed_path = vendor_dir.join("composer").join("installed.json");
        let packages = if installed_path.exists() {
            read_json::<InstalledJson>(&installed_path)?
                .into_packages()
                .into_iter()
                .map(|p| PackageDescriptor::new(p.name, p.extra))
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            vendor_dir,
            root_extra: manifest.extra,
            packages,
        })
    }

    /// Look up an installed package by name.  Composer package names are
    /// case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::PackageNotFound`] if no installed package matches.
    pub fn find_package(&self, name: &str) -> Result<&PackageDescriptor, HostError> {
        self.packages
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| HostError::PackageNotFound(name.to_string()))
    }
}

impl PackageRegistry for ComposerProject {
    fn installed_packages(&self) -> Vec<PackageDescriptor> {
        self.packages.clone()
    }

    fn root_extra(&self) -> ExtraConfig {
        self.root_extra.clone()
    }

    fn vendor_dir(&self) -> PathBuf {
        self.vendor_dir.clone()
    }

    fn project_dir(&self) -> PathBuf {
        self.project_dir.clone()
    }
}
