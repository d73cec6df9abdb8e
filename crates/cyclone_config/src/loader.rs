//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// The name of the configuration file inside a project directory.
pub const CONFIG_FILE_NAME: &str = "cyclone.toml";

/// Loads and validates a `cyclone.toml` configuration from a project directory.
///
/// Reads `<project_dir>/cyclone.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::IoError {
            path: config_path.clone(),
            source,
        })?;
    load_config_from_str(&content)
}

/// Parses and validates a `cyclone.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and values are usable.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    let timing = &config.timing;
    if timing.frequency.trim().is_empty() {
        return Err(ConfigError::MissingField("timing.frequency".to_string()));
    }
    timing.frequency()?;
    if let Some(layout) = &timing.layout {
        if layout.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "timing.layout".to_string(),
                reason: "must not be empty when given".to_string(),
            });
        }
    }
    Ok(())
}
