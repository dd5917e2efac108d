//! Refresh container configuration file handling
//!
//! ```toml
//! threshold = -1            # pixels; -1 = use region extent
//! orientation = "vertical"  # or "horizontal"
//!
//! [animation]
//! settle_duration_ms = 250
//! easing = "viscous_fluid"
//! ```

use std::fs;
use std::path::Path;

use pullover_animation::{Easing, DEFAULT_DURATION_MS};
use serde::{Deserialize, Serialize};

use crate::animator::AnimationSpec;
use crate::error::{ConfigError, Result};
use crate::options::{Orientation, RefreshOptions, Threshold};

/// Top-level refresh configuration (refresh.toml)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RefreshConfig {
    /// Trigger distance in pixels; -1 uses each region's measured extent
    #[serde(default = "default_threshold")]
    pub threshold: i32,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub animation: AnimationConfig,
}

fn default_threshold() -> i32 {
    -1
}

/// Settle animation configuration
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct AnimationConfig {
    #[serde(default = "default_settle_duration")]
    pub settle_duration_ms: u32,
    #[serde(default)]
    pub easing: Easing,
}

fn default_settle_duration() -> u32 {
    DEFAULT_DURATION_MS
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            settle_duration_ms: default_settle_duration(),
            easing: Easing::default(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            orientation: Orientation::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl RefreshConfig {
    /// Parse and validate configuration text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RefreshConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("loaded refresh config from {}", path.display());
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold < -1 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.animation.settle_duration_ms == 0 {
            return Err(ConfigError::InvalidDuration);
        }
        Ok(())
    }

    pub fn threshold(&self) -> Threshold {
        Threshold::from_raw(self.threshold)
    }

    /// Options bundle with this threshold and orientation and no regions
    pub fn into_options(self) -> RefreshOptions {
        RefreshOptions::new()
            .threshold(self.threshold())
            .orientation(self.orientation)
    }

    pub fn animation_spec(&self) -> AnimationSpec {
        AnimationSpec {
            duration_ms: self.animation.settle_duration_ms,
            easing: self.animation.easing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = RefreshConfig::from_toml_str("").unwrap();
        assert_eq!(config, RefreshConfig::default());
        assert_eq!(config.threshold(), Threshold::Extent);
        assert_eq!(config.orientation, Orientation::Vertical);
        assert_eq!(config.animation_spec(), AnimationSpec::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = RefreshConfig::from_toml_str(
            r#"
            threshold = 64
            orientation = "horizontal"

            [animation]
            settle_duration_ms = 180
            easing = "ease_out_cubic"
            "#,
        )
        .unwrap();

        assert_eq!(config.threshold(), Threshold::Pixels(64));
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(
            config.animation_spec(),
            AnimationSpec {
                duration_ms: 180,
                easing: Easing::EaseOutCubic,
            }
        );

        let options = config.into_options();
        assert_eq!(options.threshold_value(), Threshold::Pixels(64));
        assert!(options.orientation_value().is_horizontal());
        assert!(!options.has_header());
    }

    #[test]
    fn test_to_toml_reparses() {
        let mut config = RefreshConfig::default();
        config.threshold = 40;
        config.animation.easing = Easing::Linear;

        let text = config.to_toml().unwrap();
        assert!(text.contains("threshold = 40"));
        assert_eq!(RefreshConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_validation_errors() {
        let err = RefreshConfig::from_toml_str("threshold = -5").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold(-5)));

        let err = RefreshConfig::from_toml_str("[animation]\nsettle_duration_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDuration));

        let err = RefreshConfig::from_toml_str("orientation = \"diagonal\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let path = Path::new("/nonexistent/pullover/refresh.toml");
        let err = RefreshConfig::load(path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("refresh.toml"));
    }
}
