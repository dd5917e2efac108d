//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`RefreshConfig`](crate::RefreshConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be written back out
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Threshold below the `-1` sentinel
    #[error("Invalid threshold {0}: expected -1 (use region extent) or a pixel distance >= 0")]
    InvalidThreshold(i32),

    /// Settle animation with no duration
    #[error("Invalid settle duration: must be greater than 0 ms")]
    InvalidDuration,
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
