//! Logging and failure reporting.

mod logging;
mod reporter;

pub use logging::{setup_logging, LOG_FILE};
pub use reporter::TracingReporter;
pub use tracing_appender::non_blocking::WorkerGuard;
