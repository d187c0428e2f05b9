//! Core logging types: levels, entries, and the [`Log`] trait.
use std::fmt;

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Diagnostic detail, shown on the console only in verbose mode.
    Debug,
    /// Regular progress output.
    Info,
    /// Section header for a major phase of a run.
    Stage,
    /// Something unexpected that did not stop the run.
    Warn,
    /// A failure.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Stage => "stage",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(tag)
    }
}

/// A single recorded log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity of the message.
    pub level: Level,
    /// Message text.
    pub message: String,
}

/// Abstraction over logging backends.
///
/// Both [`Logger`](super::logger::Logger) (direct output through `tracing`)
/// and [`BufferedLog`](super::buffered::BufferedLog) (in-memory capture)
/// implement this trait, so synchronizer code can log without knowing
/// where the output ends up.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
}
