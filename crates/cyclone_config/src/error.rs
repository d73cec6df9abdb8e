//! Errors raised while reading `cyclone.toml`.

use std::path::PathBuf;

/// A `cyclone.toml` that could not be read or is not usable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    IoError {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not valid TOML for the expected schema.
    #[error("malformed configuration: {0}")]
    ParseError(String),

    /// A required value is absent or blank.
    #[error("`{0}` is required")]
    MissingField(String),

    /// A value is present but unusable.
    #[error("`{field}`: {reason}")]
    ValidationError {
        /// Dotted key of the value.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}
