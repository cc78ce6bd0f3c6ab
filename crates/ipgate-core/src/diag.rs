//! Diagnostic sink for malformed allowlist entries
//!
//! Logging-on-failure is a cross-cutting concern: the matcher reports
//! entries it had to skip through an injectable sink, so the matching
//! logic stays a pure predicate. Sinks are infallible by contract: a
//! sink that cannot deliver its diagnostic must not affect the match
//! result.

use parking_lot::Mutex;
use tracing::info;

use crate::error::Error;

/// Receives diagnostics for allowlist entries that were skipped as malformed
pub trait DiagnosticSink: Send + Sync {
    /// Called once per skipped entry with the entry text and the reason
    fn malformed_entry(&self, entry: &str, error: &Error);
}

// Lets a caller keep a handle on a sink it hands to the matcher
impl<T: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<T> {
    fn malformed_entry(&self, entry: &str, error: &Error) {
        (**self).malformed_entry(entry, error);
    }
}

/// Sink that forwards diagnostics to the `tracing` infrastructure
///
/// Emits at INFO level; whether anything is visible depends entirely on
/// the subscriber installed by the embedding process.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn malformed_entry(&self, entry: &str, error: &Error) {
        info!(entry, reason = %error, "Skipping malformed allowlist entry");
    }
}

/// Sink that discards all diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn malformed_entry(&self, _entry: &str, _error: &Error) {}
}

/// Sink that records diagnostics for later inspection
///
/// Useful in tests and in embedders that want to surface misconfigured
/// allowlist entries to an operator.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(entry, reason)` pairs, in the order they were reported
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.lock().clone()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Number of recorded diagnostics
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

impl DiagnosticSink for RecordingSink {
    fn malformed_entry(&self, entry: &str, error: &Error) {
        self.entries
            .lock()
            .push((entry.to_string(), error.to_string()));
    }
}
