//! Logging setup.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log file name inside the log directory.
pub const LOG_FILE: &str = "trendsignal.log";

/// Setup logging with the given level.
///
/// Console output goes to stderr so stdout stays free for signal output.
/// With `log_dir`, events are also written as JSON to a daily rolling file;
/// the returned guard must be held until exit to flush it.
pub fn setup_logging(level: &str, json: bool, log_dir: Option<&Path>) -> io::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let console = if json {
        fmt::layer().with_writer(io::stderr).json().boxed()
    } else {
        fmt::layer().with_writer(io::stderr).pretty().boxed()
    };

    let (file, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .json()
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    Ok(guard)
}
