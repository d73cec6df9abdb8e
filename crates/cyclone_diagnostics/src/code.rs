//! Diagnostic codes: a stage letter followed by a three-digit number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The analysis stage a diagnostic comes from.
///
/// Fatal problems are returned as errors by each stage, so only stages that
/// report recoverable changes to the design have a category.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Timing closure (`T`).
    Timing,
}

impl Category {
    /// Returns the code letter of this stage.
    pub fn prefix(self) -> char {
        match self {
            Category::Timing => 'T',
        }
    }
}

/// Identifies one kind of diagnostic, e.g. `T001`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// Stage that owns the code.
    pub category: Category,
    /// Number within the stage.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a code.
    pub fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
