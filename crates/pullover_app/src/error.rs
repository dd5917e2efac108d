//! Scenario loading errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a headless scenario
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// Scenario file could not be read
    #[error("Failed to read scenario {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scenario text is not valid JSON for the step schema
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),

    /// Layout section describes an impossible container
    #[error("Invalid scenario layout: {0}")]
    InvalidLayout(String),
}

/// Result type for scenario loading
pub type Result<T> = std::result::Result<T, ScenarioError>;
