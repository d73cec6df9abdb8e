//! Collects the diagnostics of an analysis run.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::Mutex;

#[derive(Default)]
struct Collected {
    diagnostics: Vec<Diagnostic>,
    errors: usize,
    warnings: usize,
}

/// Shared, append-only collection point for diagnostics.
///
/// Analysis stages take `&DiagnosticSink`, so a single sink can be shared
/// between stages and threads. Counts survive [`take_all`](Self::take_all).
#[derive(Default)]
pub struct DiagnosticSink {
    collected: Mutex<Collected>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        let mut collected = self.collected.lock().unwrap();
        match diag.severity {
            Severity::Error => collected.errors += 1,
            Severity::Warning => collected.warnings += 1,
            Severity::Note => {}
        }
        collected.diagnostics.push(diag);
    }

    /// Returns `true` once any error has been recorded.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of errors recorded.
    pub fn error_count(&self) -> usize {
        self.collected.lock().unwrap().errors
    }

    /// Number of warnings recorded.
    pub fn warning_count(&self) -> usize {
        self.collected.lock().unwrap().warnings
    }

    /// The most severe diagnostic recorded, if any.
    pub fn worst_severity(&self) -> Option<Severity> {
        let collected = self.collected.lock().unwrap();
        collected.diagnostics.iter().map(|d| d.severity).max()
    }

    /// Drains the recorded diagnostics.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.collected.lock().unwrap().diagnostics)
    }

    /// Copies the recorded diagnostics, leaving them in place.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.collected.lock().unwrap().diagnostics.clone()
    }
}
