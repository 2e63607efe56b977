//! Application configuration module
//!
//! This module handles session-wide configuration including snapping,
//! click validation thresholds, animation playback, and drawing defaults.

mod manager;

pub use manager::{
    ConfigError, ConfigManager, ConfigResult, SharedConfig, create_shared_config, shared_config_at,
};

use compass_core::Color;
use serde::{Deserialize, Serialize};

/// Snapping preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapConfig {
    /// Snap clicks to nearby points and lines
    pub enabled: bool,
    /// Snap radius in screen units (divided by the zoom factor)
    pub threshold: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 15.0,
        }
    }
}

/// Click and numeric input validation thresholds, in world units
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationConfig {
    /// Minimum distance between consecutive clicks of a construction
    pub min_separation: f64,
    /// Minimum distance between the endpoints of a plain segment
    pub segment_min_separation: f64,
    /// Smallest circle accepted as the base of the tangent construction
    pub min_tangent_radius: f64,
    /// How far from the Thales circle a click may land and still be accepted
    pub circle_pick_tolerance: f64,
    /// Largest accepted fixed length in centimetres
    pub max_length_cm: f64,
    /// Largest accepted drawn angle in degrees
    pub max_angle_degrees: f64,
    /// Value proposed when a length is requested
    pub default_length_cm: f64,
    /// Value proposed when an angle is requested
    pub default_angle_degrees: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_separation: 20.0,
            segment_min_separation: 5.0,
            min_tangent_radius: 20.0,
            circle_pick_tolerance: 30.0,
            max_length_cm: 20.0,
            max_angle_degrees: 180.0,
            default_length_cm: 5.0,
            default_angle_degrees: 60.0,
        }
    }
}

/// Construction playback preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimationConfig {
    /// Hold each construction in the animating step until playback finishes.
    /// When disabled, constructions are committed as soon as they are computed.
    pub enabled: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Drawing preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DrawingConfig {
    /// Colour applied to new geometry until the user picks another one
    pub default_color: Color,
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    /// Snap settings
    #[serde(default)]
    pub snap: SnapConfig,
    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Animation settings
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Drawing settings
    #[serde(default)]
    pub drawing: DrawingConfig,
}

impl AppConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }

    /// Defaults with animation playback turned off
    pub fn immediate() -> Self {
        let mut config = Self::new();
        config.animation.enabled = false;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = ron::from_str("(version: 1, animation: (enabled: false))").unwrap();
        assert!(!config.animation.enabled);
        assert_eq!(config.validation, ValidationConfig::default());
        assert_eq!(config.drawing.default_color, Color::BLACK);
    }

    #[test]
    fn test_color_is_stored_as_hex() {
        let mut config = AppConfig::new();
        config.drawing.default_color = Color::EMPHASIS;
        let text = ron::to_string(&config).unwrap();
        assert!(text.contains("#ef4444"));
    }
}
