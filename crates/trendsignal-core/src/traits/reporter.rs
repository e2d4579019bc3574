//! Error reporting collaborator.

use crate::error::CollaboratorError;

/// Receives collaborator failures that were absorbed into a fallback signal.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, symbol: &str, failure: &CollaboratorError);
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ErrorReporter for NoopReporter {
    fn report(&self, _symbol: &str, _failure: &CollaboratorError) {}
}
