//! Replay configuration
//!
//! Loaded from a YAML file (`--config` or `HIDREPLAY_CONFIG`). Every field
//! has a default, and command-line flags override whatever the file sets.

use crate::error::CliError;
use hidreplay_pointer::DEFAULT_MIN_RENDER_POINTS;
use hidreplay_report::{DEFAULT_SENTINEL, SourceFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfig {
    /// Record text meaning "no capture data for this sample".
    pub sentinel: String,
    pub format: SourceFormat,
    /// Keep every Nth input line.
    pub stride: usize,
    pub keyboard: KeyboardConfig,
    pub pointer: PointerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyboardConfig {
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PointerConfig {
    pub output: PathBuf,
    /// Strokes shorter than this are reported as not drawable.
    pub min_render_points: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            format: SourceFormat::Lines,
            stride: 1,
            keyboard: KeyboardConfig::default(),
            pointer: PointerConfig::default(),
        }
    }
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("clean_message.txt"),
        }
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("strokes.json"),
            min_render_points: DEFAULT_MIN_RENDER_POINTS,
        }
    }
}

impl ReplayConfig {
    /// Read and validate a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Err(CliError::InputNotFound(format!(
                "config file '{}'",
                path.display()
            )));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, CliError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CliError> {
        if self.stride == 0 {
            return Err(CliError::InvalidConfiguration(
                "stride must be at least 1".to_string(),
            ));
        }
        if self.sentinel.trim().is_empty() {
            return Err(CliError::InvalidConfiguration(
                "sentinel must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_defaults() {
        let config = ReplayConfig::default();
        assert_eq!(config.sentinel, "0");
        assert_eq!(config.stride, 1);
        assert_eq!(config.format, SourceFormat::Lines);
        assert_eq!(config.keyboard.output, PathBuf::from("clean_message.txt"));
        assert_eq!(config.pointer.min_render_points, 2);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() -> TestResult {
        let config = ReplayConfig::from_yaml("stride: 2\npointer:\n  min_render_points: 1\n")?;
        assert_eq!(config.stride, 2);
        assert_eq!(config.pointer.min_render_points, 1);
        assert_eq!(config.pointer.output, PathBuf::from("strokes.json"));
        assert_eq!(config.sentinel, "0");
        Ok(())
    }

    #[test]
    fn test_format_names() -> TestResult {
        let config = ReplayConfig::from_yaml("format: json-lines\n")?;
        assert_eq!(config.format, SourceFormat::JsonLines);
        Ok(())
    }

    #[test]
    fn test_zero_stride_rejected() {
        assert!(matches!(
            ReplayConfig::from_yaml("stride: 0\n"),
            Err(CliError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_empty_sentinel_rejected() {
        assert!(matches!(
            ReplayConfig::from_yaml("sentinel: ' '\n"),
            Err(CliError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            ReplayConfig::from_yaml("strid: 2\n"),
            Err(CliError::YamlError(_))
        ));
    }
}
