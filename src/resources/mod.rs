//! Idempotent filesystem resources (plan + apply pattern).
pub mod fs;
pub mod mapping;
pub mod plan;

use crate::error::Result;

/// Minimal interface for resources that can be applied and removed.
pub trait Applicable {
    /// Apply the resource change.
    ///
    /// This method should:
    /// - Create parent directories if needed
    /// - Update the resource to match the desired state
    /// - Return the appropriate `ResourceChange` result
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O failures
    /// or permission issues.
    fn apply(&self) -> Result<ResourceChange>;

    /// Remove the resource, undoing a previous `apply()`.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing resource cannot be removed.
    fn remove(&self) -> Result<ResourceChange>;
}

/// Result of applying or removing a resource.
///
/// # Examples
///
/// ```
/// use copy_mapping::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied { changed: 2, kept: 1 };
/// let noop = ResourceChange::AlreadyCorrect;
/// let skipped = ResourceChange::Skipped { reason: "not writable".into() };
///
/// assert_eq!(applied.changed(), 2);
/// assert_eq!(noop.changed(), 0);
/// assert_ne!(noop, skipped);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created, updated, or deleted.
    Applied {
        /// Number of files written or removed.
        changed: usize,
        /// Number of files deliberately left in place.
        kept: usize,
    },
    /// Resource was already in the desired state (no change needed).
    AlreadyCorrect,
    /// Resource was left alone.
    Skipped {
        /// Reason why the resource was skipped.
        reason: String,
    },
}

impl ResourceChange {
    /// Number of files written or removed.
    #[must_use]
    pub const fn changed(&self) -> usize {
        match self {
            Self::Applied { changed, .. } => *changed,
            Self::AlreadyCorrect | Self::Skipped { .. } => 0,
        }
    }

    /// Number of files deliberately left in place.
    #[must_use]
    pub const fn kept(&self) -> usize {
        match self {
            Self::Applied { kept, .. } => *kept,
            Self::AlreadyCorrect | Self::Skipped { .. } => 0,
        }
    }
}
