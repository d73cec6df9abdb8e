//! Parsing and validation of `cyclone.toml` timing configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`ProjectConfig`] carrying the target frequency, the delay-cost table, and
//! the optional device layout path consumed by timing analysis.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
