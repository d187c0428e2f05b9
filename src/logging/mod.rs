//! Logging infrastructure: the [`Log`] sink trait and its backends.

mod buffered;
mod logger;
mod subscriber;
mod types;

pub use buffered::BufferedLog;
pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{Level, Log, LogEntry};
