pub mod config;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use pullover_layout::RefreshConfig;

/// Load the configuration at `path`, or the defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<RefreshConfig> {
    match path {
        Some(path) => RefreshConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(RefreshConfig::default()),
    }
}
