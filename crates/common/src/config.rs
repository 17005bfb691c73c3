use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a vehicle picks its next heading when a movement segment completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingDraw {
    /// Uniform over all five headings.
    #[default]
    Uniform,
    /// Draw from nine buckets folded onto five headings; `Stop` comes up half
    /// as often as the others.
    Legacy,
}

/// Errors from loading or validating a town configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Town and simulation parameters.
///
/// Every field has a default, so a YAML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TownConfig {
    pub plane_width: u32,
    pub plane_height: u32,
    pub block_size: u32,
    /// Number of pre-drawn height samples.
    pub height_samples: usize,
    /// Samples are drawn from `[0, height_range)`.
    pub height_range: u32,
    pub fleet_size: usize,
    /// Fraction of one block a vehicle covers per tick.
    pub cruise_speed: f32,
    /// Inset from each plane edge that vehicles keep to.
    pub road_margin: f32,
    pub seed: u64,
    pub heading_draw: HeadingDraw,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for TownConfig {
    fn default() -> Self {
        Self {
            plane_width: 300,
            plane_height: 300,
            block_size: 30,
            height_samples: 100,
            height_range: 5,
            fleet_size: 40,
            cruise_speed: 0.01,
            road_margin: 11.0,
            seed: 1,
            heading_draw: HeadingDraw::Uniform,
            viewport_width: 800,
            viewport_height: 600,
        }
    }
}

impl TownConfig {
    /// Load a configuration from a YAML file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&text)
    }

    /// Parse and validate a configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the parameters the layout and traffic code rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::Invalid("block_size must be positive".into()));
        }
        if self.block_size > self.plane_width || self.block_size > self.plane_height {
            return Err(ConfigError::Invalid(format!(
                "block_size {} exceeds the {}x{} plane",
                self.block_size, self.plane_width, self.plane_height
            )));
        }
        if self.height_range == 0 {
            return Err(ConfigError::Invalid("height_range must be positive".into()));
        }
        if self.cruise_speed.is_nan() || self.cruise_speed <= 0.0 {
            return Err(ConfigError::Invalid("cruise_speed must be positive".into()));
        }
        let narrow = self.plane_width.min(self.plane_height) as f32;
        if self.road_margin < 0.0 || self.road_margin * 2.0 >= narrow {
            return Err(ConfigError::Invalid(format!(
                "road_margin {} leaves no road on a {narrow}-unit plane",
                self.road_margin
            )));
        }
        Ok(())
    }

    /// Whole blocks along x and y; any remainder strip is dropped.
    pub fn blocks_per_axis(&self) -> (u32, u32) {
        (
            self.plane_width / self.block_size,
            self.plane_height / self.block_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_stock_town() {
        let c = TownConfig::default();
        assert_eq!(c.blocks_per_axis(), (10, 10));
        assert_eq!(c.fleet_size, 40);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let c = TownConfig::from_yaml("fleet_size: 3\nheading_draw: legacy\n").unwrap();
        assert_eq!(c.fleet_size, 3);
        assert_eq!(c.heading_draw, HeadingDraw::Legacy);
        assert_eq!(c.block_size, 30);
    }

    #[test]
    fn zero_block_size_rejected() {
        let err = TownConfig::from_yaml("block_size: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn oversized_block_rejected() {
        let c = TownConfig {
            block_size: 400,
            ..TownConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn margin_must_leave_road() {
        let c = TownConfig {
            road_margin: 150.0,
            ..TownConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "seed: 99\nplane_width: 310\n").unwrap();
        let c = TownConfig::load(tmp.path()).unwrap();
        assert_eq!(c.seed, 99);
        assert_eq!(c.blocks_per_axis(), (10, 10));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TownConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
