//! Console logger backed by `tracing`.
use super::types::Log;

/// Tracing target used for stage headers so the formatter can render them
/// differently from plain info lines.
pub(super) const STAGE_TARGET: &str = "copy_mapping::stage";

/// Implement the methods of [`Log`] by delegating to inherent methods of
/// the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Logger that emits every message as a `tracing` event.
///
/// Whether a message reaches the console is decided by the subscriber
/// installed with [`init_subscriber`](super::subscriber::init_subscriber):
/// debug events are only shown in verbose mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct Logger;

impl Logger {
    /// Create a new logger.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);
}
