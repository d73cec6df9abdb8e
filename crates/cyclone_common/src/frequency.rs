//! Target clock frequency with unit parsing and the clock budget it implies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

/// Numerator of the clock budget: one microsecond expressed in delay units.
///
/// Delay costs are configured in picoseconds, so a frequency in MHz divides
/// this to give the clock period in the same unit.
pub const BUDGET_NUMERATOR: u64 = 1_000_000;

/// A target clock frequency stored as a whole, non-zero number of megahertz.
///
/// Supports parsing from strings like "100MHz", "1GHz" and bare numbers
/// (interpreted as MHz). Fractional megahertz values are rejected because the
/// clock budget is computed with integer arithmetic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frequency(NonZeroU64);

impl Frequency {
    /// Creates a frequency from a value in megahertz. Returns `None` for zero.
    pub fn from_mhz(mhz: u64) -> Option<Self> {
        NonZeroU64::new(mhz).map(Self)
    }

    /// Returns the frequency in megahertz.
    pub fn mhz(&self) -> u64 {
        self.0.get()
    }

    /// Returns the clock budget: `1_000_000 / mhz` with integer division.
    ///
    /// Frequencies that do not divide 1,000,000 evenly truncate, producing a
    /// budget slightly tighter than the true period (3 MHz gives 333,333).
    pub fn clock_budget(&self) -> u64 {
        BUDGET_NUMERATOR / self.0.get()
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mhz = self.0.get();
        if mhz % 1_000 == 0 {
            write!(f, "{}GHz", mhz / 1_000)
        } else {
            write!(f, "{mhz}MHz")
        }
    }
}

/// Error type for parsing frequency strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFrequencyError {
    /// The input is not a number with an optional unit suffix.
    #[error("invalid frequency: '{0}'")]
    Malformed(String),
    /// The input parsed, but is not a whole number of megahertz.
    #[error("frequency '{0}' is not a whole number of MHz")]
    FractionalMhz(String),
    /// The input parsed to zero.
    #[error("frequency must be non-zero")]
    Zero,
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();

        let (num, scale) = if let Some(num) = lower.strip_suffix("ghz") {
            (num, 1_000.0)
        } else if let Some(num) = lower.strip_suffix("mhz") {
            (num, 1.0)
        } else {
            // Bare number: MHz
            (lower.as_str(), 1.0)
        };

        let val: f64 = num
            .trim()
            .parse()
            .map_err(|_| ParseFrequencyError::Malformed(s.to_string()))?;
        let mhz = val * scale;
        if !mhz.is_finite() || mhz < 0.0 {
            return Err(ParseFrequencyError::Malformed(s.to_string()));
        }
        if mhz.fract() != 0.0 {
            return Err(ParseFrequencyError::FractionalMhz(s.to_string()));
        }
        Frequency::from_mhz(mhz as u64).ok_or(ParseFrequencyError::Zero)
    }
}
