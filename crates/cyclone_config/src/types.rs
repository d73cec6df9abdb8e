//! Configuration types deserialized from `cyclone.toml`.

use crate::error::ConfigError;
use cyclone_common::Frequency;
use serde::Deserialize;

/// The top-level configuration parsed from `cyclone.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Timing-closure settings.
    pub timing: TimingSection,
}

/// The `[timing]` section: clock target, delay costs, and device layout.
#[derive(Debug, Deserialize)]
pub struct TimingSection {
    /// The target clock frequency as a string (e.g., "100MHz"), parsed to [`Frequency`].
    pub frequency: String,
    /// Path to the device layout file, relative to the project directory.
    #[serde(default)]
    pub layout: Option<String>,
    /// Per-category delay costs.
    pub costs: CostConfig,
}

impl TimingSection {
    /// Parses the configured target frequency.
    pub fn frequency(&self) -> Result<Frequency, ConfigError> {
        self.frequency
            .parse::<Frequency>()
            .map_err(|e| ConfigError::ValidationError {
                field: "timing.frequency".to_string(),
                reason: e.to_string(),
            })
    }
}

/// The `[timing.costs]` table, one integer delay per cost category.
///
/// Delays are in picoseconds, the same unit as the clock budget derived from
/// the target frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostConfig {
    /// Logic-block operand (PE input port) delay.
    pub clb_op: u64,
    /// Memory port delay. Memory outputs are registered.
    pub mem: u64,
    /// Pipeline register delay.
    pub reg: u64,
    /// Output switchbox delay on a logic-block tile.
    pub clb_sb: u64,
    /// Output switchbox delay on a memory tile.
    pub mem_sb: u64,
    /// Routing multiplexer delay.
    pub rmux: u64,
}
