//! Collects the diagnostics of one analysis pass.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Accumulates diagnostics emitted by lint rules.
///
/// Rules may emit from rayon workers, so the sink is shared by reference and
/// keeps a per-severity tally that can be read without taking the lock.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    tally: [AtomicUsize; 3],
}

fn slot(severity: Severity) -> usize {
    match severity {
        Severity::Note => 0,
        Severity::Warning => 1,
        Severity::Error => 2,
    }
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            tally: Default::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Records one diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        self.tally[slot(diag.severity)].fetch_add(1, Ordering::Relaxed);
        self.lock().push(diag);
    }

    /// Number of diagnostics emitted so far at `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.tally[slot(severity)].load(Ordering::Relaxed)
    }

    /// Number of error-severity diagnostics emitted so far.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Whether a denied rule fired.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Drains the collected diagnostics. The tally is kept.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    /// Copies the collected diagnostics, leaving them in place.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}
