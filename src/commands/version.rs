//! Command: print version information.
use crate::logging::Logger;

/// Version string: `COPY_MAPPING_VERSION` captured at build time, or the
/// crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("COPY_MAPPING_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the copy-mapping version.
pub fn run(log: &Logger) {
    log.info(&format!("copy-mapping {}", version()));
}
