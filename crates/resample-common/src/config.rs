//! Configuration for geometry construction and boundary extraction.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// Runtime switches shared by the geometry crates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Build the future `SwathDefinition` instead of the legacy one.
    pub future_geometries: bool,

    /// Default number of vertices per bbox side (`None` = full perimeter).
    pub bbox_frequency: Option<usize>,

    /// Always return bbox sides in clockwise order.
    pub force_clockwise: bool,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            future_geometries: true,
            bbox_frequency: None,
            force_clockwise: false,
        }
    }
}

impl GeometryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("RESAMPLE_FUTURE_GEOMETRIES") {
            config.future_geometries = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("RESAMPLE_BBOX_FREQUENCY") {
            if val.is_empty() || val.eq_ignore_ascii_case("none") {
                config.bbox_frequency = None;
            } else if let Ok(frequency) = val.parse() {
                config.bbox_frequency = Some(frequency);
            } else {
                tracing::warn!(value = %val, "ignoring unparsable RESAMPLE_BBOX_FREQUENCY");
            }
        }

        if let Ok(val) = std::env::var("RESAMPLE_FORCE_CLOCKWISE") {
            config.force_clockwise = parse_flag(&val);
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        match self.bbox_frequency {
            Some(frequency) if frequency < 2 => Err(GeometryError::config(format!(
                "bbox_frequency must be at least 2, got {frequency}"
            ))),
            _ => Ok(()),
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val.eq_ignore_ascii_case("true") || val == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeometryConfig::default();
        assert!(config.future_geometries);
        assert_eq!(config.bbox_frequency, None);
        assert!(!config.force_clockwise);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_small_frequency() {
        let config = GeometryConfig {
            bbox_frequency: Some(1),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GeometryError::Config(_))));
    }

    #[test]
    fn test_json_missing_fields_use_defaults() {
        let config: GeometryConfig = serde_json::from_str(r#"{"force_clockwise": true}"#).unwrap();
        assert!(config.future_geometries);
        assert!(config.force_clockwise);
        assert_eq!(config.bbox_frequency, None);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("yes"));
    }
}
