//! Error types for settings handling

use std::path::PathBuf;

/// Errors that can occur while loading, validating or saving settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the settings file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File that was accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for the settings schema.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is outside its allowed range.
    #[error("invalid value for {field}: {reason}")]
    Validation {
        /// Name of the offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// No per-user configuration directory is available on this platform.
    #[error("no configuration directory available")]
    NoConfigDir,
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
