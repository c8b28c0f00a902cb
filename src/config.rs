use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

// Instrument sizing
pub const SIZE_DIVISOR: f32 = 14.3;
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;

// Unit conversions
pub const KNOTS_PER_MPS: f64 = 1.94384;
pub const FEET_PER_METER: f64 = 3.28084;

// Class names shared with external styling code
pub const PANEL_CLASS: &str = "indicators";
pub const SHOW_CLASS: &str = "show";
pub const HIDE_CLASS: &str = "hide";
pub const GPS_CLASS: &str = "gps";
pub const READOUT_ICON_CLASS: &str = "indicator_icons";

// Initial widget values
pub const INITIAL_HEADING: f64 = 0.0;
pub const INITIAL_VARIO: f64 = -5.0;
pub const INITIAL_READOUT_TEXT: &str = "0";

pub const DEFAULT_IMAGE_DIRECTORY: &str = "jQuery-Flight-Indicators/img/";
pub const DEFAULT_READOUT_ICON_DIRECTORY: &str = "assets/indicators/images";
pub const DEFAULT_CONFIG_PATH: &str = "indicators.json";

/// Which panel wins when more than one vehicle claims the active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Smallest vehicle id is shown.
    #[default]
    LowestId,
    /// Last active vehicle in fleet order is shown.
    LastInOrder,
}

/// Instrument panel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub size_divisor: f32,
    pub image_directory: String,
    pub readout_icon_directory: String,
    pub show_box: bool,
    pub readout_color_hint: String,
    pub tie_break: TieBreak,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            size_divisor: SIZE_DIVISOR,
            image_directory: DEFAULT_IMAGE_DIRECTORY.to_string(),
            readout_icon_directory: DEFAULT_READOUT_ICON_DIRECTORY.to_string(),
            show_box: true,
            readout_color_hint: "red".to_string(),
            tie_break: TieBreak::default(),
        }
    }
}

impl IndicatorConfig {
    /// Load configuration from JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: IndicatorConfig = serde_json::from_str(contents)?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is absent or invalid
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load_from_file(&path) {
            Ok(config) => {
                tracing::info!(path = %path.as_ref().display(), "loaded indicator config");
                config
            }
            Err(e) => {
                tracing::info!(error = %e, "using default indicator config");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = IndicatorConfig::from_json(r#"{ "tie_break": "last_in_order" }"#).unwrap();
        assert_eq!(config.tie_break, TieBreak::LastInOrder);
        assert_eq!(config.size_divisor, SIZE_DIVISOR);
        assert!(config.show_box);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = IndicatorConfig::from_json("{ size_divisor: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
