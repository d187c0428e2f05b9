//! Per-package configuration resolution.
//!
//! The host hands over loosely-typed `extra` blocks (JSON objects) for the
//! root project and for each package.  This module merges them and parses
//! the recognised keys into a typed [`EffectiveConfig`]; nothing downstream
//! ever looks at the raw map again.
pub mod validation;

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;

use crate::error::Rejection;
use crate::host::PackageDescriptor;

/// A JSON `extra` block with insertion order preserved.
pub type ExtraConfig = serde_json::Map<String, Value>;

/// Key holding the `from -> to` mapping object.
pub const COPY_MAPPING_KEY: &str = "copy-mapping";
/// Key selecting the overwrite strategy.
pub const STRATEGY_KEY: &str = "copy-mapping-strategy";
/// Key holding the destination root.
pub const ROOT_KEY: &str = "copy-mapping-root";
/// Destination root used when none is configured.
pub const DEFAULT_ROOT: &str = "./";

/// Overwrite policy for destination files that already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Keep existing destination files.
    #[default]
    Simple,
    /// Overwrite existing destination files.
    Force,
}

impl Strategy {
    /// Parse a configured strategy.  Anything other than the two recognised
    /// literals (including a missing value) yields [`Strategy::Simple`].
    ///
    /// # Examples
    ///
    /// ```
    /// use copy_mapping::config::Strategy;
    /// use serde_json::json;
    ///
    /// assert_eq!(Strategy::from_value(Some(&json!("force"))), Strategy::Force);
    /// assert_eq!(Strategy::from_value(Some(&json!("FORCE"))), Strategy::Simple);
    /// assert_eq!(Strategy::from_value(None), Strategy::Simple);
    /// ```
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("force") => Self::Force,
            _ => Self::Simple,
        }
    }

    /// The configuration literal for this strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Force => "force",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared `from -> to` pair, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingPair {
    /// Path relative to the package's install directory.
    pub from: String,
    /// Path relative to the destination root.
    pub to: String,
}

/// A mapping pair resolved to concrete filesystem paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyEntry {
    /// Absolute or project-relative source path inside the vendor directory.
    pub source: PathBuf,
    /// Destination path under the root.
    pub target: PathBuf,
}

/// The typed configuration for one package, recomputed on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    /// Overwrite policy.
    pub strategy: Strategy,
    /// Destination root as configured (relative roots resolve against the
    /// project directory).
    pub root: String,
    /// Declared pairs in declaration order.
    pub mapping: Vec<MappingPair>,
}

/// Overlay `package_extra` on top of `root_extra`.  Package values win on
/// key collisions.
#[must_use]
pub fn merge_extra(root_extra: &ExtraConfig, package_extra: &ExtraConfig) -> ExtraConfig {
    let mut merged = root_extra.clone();
    for (key, value) in package_extra {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

impl EffectiveConfig {
    /// Resolve the configuration used to copy `package`.
    ///
    /// Checks run in a fixed order and the first failure wins: the root
    /// value, then the root directory itself (resolved against
    /// `project_dir`), then the mapping.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] if `copy-mapping-root` is not a non-empty
    /// string or does not name a writable directory, or if `copy-mapping`
    /// is missing, empty, or malformed.
    pub fn for_copy(
        package: &PackageDescriptor,
        root_extra: &ExtraConfig,
        project_dir: &Path,
    ) -> Result<Self, Rejection> {
        let merged = merge_extra(root_extra, &package.extra);
        let root = match merged.get(ROOT_KEY) {
            None | Some(Value::Null) => DEFAULT_ROOT.to_string(),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(_) => return Err(Rejection::RootMalformed),
        };
        let mut config = Self {
            strategy: Strategy::from_value(merged.get(STRATEGY_KEY)),
            root,
            mapping: Vec::new(),
        };
        validation::validate_root(&config.destination_root(project_dir))?;
        config.mapping = parse_mapping(package.extra.get(COPY_MAPPING_KEY))?;
        Ok(config)
    }

    /// Resolve the configuration used to remove `package`'s copies.
    ///
    /// Never fails: a non-string root falls back to [`DEFAULT_ROOT`], a
    /// mapping that is absent, empty or not an object becomes the empty
    /// mapping, and a pair whose target is not a string is dropped while the
    /// remaining pairs are kept.
    #[must_use]
    pub fn for_removal(package: &PackageDescriptor, root_extra: &ExtraConfig) -> Self {
        let merged = merge_extra(root_extra, &package.extra);
        let root = merged
            .get(ROOT_KEY)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ROOT)
            .to_string();
        Self {
            strategy: Strategy::from_value(merged.get(STRATEGY_KEY)),
            root,
            mapping: removal_mapping(package.extra.get(COPY_MAPPING_KEY)),
        }
    }

    /// The destination root resolved against `project_dir`.
    #[must_use]
    pub fn destination_root(&self, project_dir: &Path) -> PathBuf {
        clean(&project_dir.join(&self.root))
    }

    /// Resolve every pair to concrete source and target paths.
    #[must_use]
    pub fn copy_entries(&self, install_dir: &Path, project_dir: &Path) -> Vec<CopyEntry> {
        let root = self.destination_root(project_dir);
        self.mapping
            .iter()
            .map(|pair| CopyEntry {
                source: clean(&install_dir.join(relative_path(&pair.from))),
                target: clean(&root.join(relative_path(&pair.to))),
            })
            .collect()
    }
}

/// Parse the `copy-mapping` value into ordered pairs.
fn parse_mapping(value: Option<&Value>) -> Result<Vec<MappingPair>, Rejection> {
    let map = match value {
        None | Some(Value::Null) => return Err(Rejection::MappingMissing),
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(Rejection::MappingMalformed {
                reason: "expected an object of paths".to_string(),
            });
        }
    };
    if map.is_empty() {
        return Err(Rejection::MappingMissing);
    }
    map.iter()
        .map(|(from, to)| {
            to.as_str()
                .map(|to| MappingPair {
                    from: from.clone(),
                    to: to.to_string(),
                })
                .ok_or_else(|| Rejection::MappingMalformed {
                    reason: format!("target for '{from}' is not a string"),
                })
        })
        .collect()
}

/// Collect the string-valued pairs of a `copy-mapping` object.
fn removal_mapping(value: Option<&Value>) -> Vec<MappingPair> {
    let Some(Value::Object(map)) = value else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(from, to)| {
            to.as_str().map(|to| MappingPair {
                from: from.clone(),
                to: to.to_string(),
            })
        })
        .collect()
}

/// Treat a configured path as relative by dropping leading separators, so
/// `"/public"` and `"public"` both land under the base directory.
fn relative_path(raw: &str) -> &Path {
    Path::new(raw.trim_start_matches(['/', '\\']))
}

/// Drop `.` components and trailing separators.
fn clean(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}
