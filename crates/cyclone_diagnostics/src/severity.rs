//! How serious a diagnostic is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity. Compares in increasing order of seriousness.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// Informational, e.g. a run summary.
    Note,
    /// The analysis changed the design to proceed, e.g. by pipelining a net.
    Warning,
    /// The result cannot be used.
    Error,
}

impl Severity {
    /// Lower-case label used in rendered output.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
