//! Error reporter backed by tracing.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::error;
use trendsignal_core::error::CollaboratorError;
use trendsignal_core::traits::ErrorReporter;

/// Emits every absorbed collaborator failure as an `error` event and keeps
/// a running count.
#[derive(Debug, Default)]
pub struct TracingReporter {
    reported: AtomicUsize,
}

impl TracingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Failures reported so far.
    pub fn count(&self) -> usize {
        self.reported.load(Ordering::Relaxed)
    }
}

impl ErrorReporter for TracingReporter {
    fn report(&self, symbol: &str, failure: &CollaboratorError) {
        self.reported.fetch_add(1, Ordering::Relaxed);
        error!(symbol, error = %failure, "Signal fell back to HOLD");
    }
}
