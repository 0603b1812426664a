//! Configuration for viewport motion, scrolling and chrome
//!
//! Presets are exposed through [`ViewportProfile`]; a custom configuration
//! can also be loaded from JSON.

use crate::core::constants::{
    CROSS_SIZE, GLIDE_FRICTION, MAX_PAN_SAMPLES, PAN_AVERAGE_POINTS, PAN_INTERVAL_MS,
    SCALE_BAR_WIDTH, SETTLE_VELOCITY, SMALL_SCROLL_STEP,
};
use crate::input::events::KeyCode;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewportProfile {
    Balanced,
    /// Short averaging window and quick glide stop
    Responsive,
    /// Long averaging window and long glides
    Smooth,
    Custom(ViewportConfig),
}

impl ViewportProfile {
    pub fn resolve(&self) -> ViewportConfig {
        match self {
            Self::Balanced => ViewportConfig {
                motion: MotionConfig::default(),
                scroll: ScrollConfig::default(),
                overlay: OverlayConfig::default(),
                keys: KeyBindings::default(),
            },
            Self::Responsive => ViewportConfig {
                motion: MotionConfig {
                    pan_interval_ms: 16,
                    average_points: 4,
                    glide_friction: 0.05,
                    settle_velocity: SETTLE_VELOCITY,
                },
                scroll: ScrollConfig { small_step_px: 60 },
                overlay: OverlayConfig::default(),
                keys: KeyBindings::default(),
            },
            Self::Smooth => ViewportConfig {
                motion: MotionConfig {
                    pan_interval_ms: PAN_INTERVAL_MS,
                    average_points: MAX_PAN_SAMPLES,
                    glide_friction: 0.005,
                    settle_velocity: SETTLE_VELOCITY,
                },
                scroll: ScrollConfig::default(),
                overlay: OverlayConfig::default(),
                keys: KeyBindings::default(),
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for ViewportProfile {
    fn default() -> Self {
        Self::Balanced
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub motion: MotionConfig,
    pub scroll: ScrollConfig,
    pub overlay: OverlayConfig,
    pub keys: KeyBindings,
}

impl ViewportConfig {
    /// Parses a configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ViewportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let m = &self.motion;
        if m.pan_interval_ms == 0 {
            return Err(MapError::InvalidConfig(
                "pan_interval_ms must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&m.glide_friction) {
            return Err(MapError::InvalidConfig(format!(
                "glide_friction {} outside [0, 1)",
                m.glide_friction
            )));
        }
        if m.settle_velocity <= 0.0 {
            return Err(MapError::InvalidConfig(
                "settle_velocity must be positive".to_string(),
            ));
        }
        if self.scroll.small_step_px <= 0 {
            return Err(MapError::InvalidConfig(
                "small_step_px must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Minimum spacing between processed ticks
    pub pan_interval_ms: u64,
    /// Moving-average window, clamped to `1..=MAX_PAN_SAMPLES`
    pub average_points: usize,
    pub glide_friction: f64,
    /// Velocity (px/s) under which motion counts as settled
    pub settle_velocity: f64,
}

impl MotionConfig {
    pub fn window(&self) -> usize {
        self.average_points.clamp(1, MAX_PAN_SAMPLES)
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            pan_interval_ms: PAN_INTERVAL_MS,
            average_points: PAN_AVERAGE_POINTS,
            glide_friction: GLIDE_FRICTION,
            settle_velocity: SETTLE_VELOCITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub small_step_px: i64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            small_step_px: SMALL_SCROLL_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub show_scale_bar: bool,
    /// Meters per pixel at the latitude of the view center
    pub show_scale_text: bool,
    pub show_crosshair: bool,
    pub show_lat_lon: bool,
    pub show_debug_info: bool,
    pub crosshair_size: i32,
    pub scale_bar_width: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            show_scale_bar: true,
            show_scale_text: true,
            show_crosshair: true,
            show_lat_lon: true,
            show_debug_info: true,
            crosshair_size: CROSS_SIZE,
            scale_bar_width: SCALE_BAR_WIDTH,
        }
    }
}

/// The two zoom keys; arrow keys always scroll
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub zoom_in: KeyCode,
    pub zoom_out: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            zoom_in: KeyCode::Digit(3),
            zoom_out: KeyCode::Digit(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_is_default() {
        assert_eq!(ViewportProfile::Balanced.resolve(), ViewportConfig::default());
        assert_eq!(ViewportConfig::default().motion.pan_interval_ms, 30);
        assert_eq!(ViewportConfig::default().motion.window(), 8);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            ViewportConfig::from_json_str(r#"{ "motion": { "glide_friction": 0.02 } }"#).unwrap();
        assert_eq!(config.motion.glide_friction, 0.02);
        assert_eq!(config.motion.average_points, PAN_AVERAGE_POINTS);
        assert_eq!(config.scroll.small_step_px, SMALL_SCROLL_STEP);
        assert_eq!(config.keys.zoom_in, KeyCode::Digit(3));
        assert_eq!(config.keys.zoom_out, KeyCode::Digit(1));
    }

    #[test]
    fn test_invalid_friction_rejected() {
        let err = ViewportConfig::from_json_str(r#"{ "motion": { "glide_friction": 1.5 } }"#);
        assert!(matches!(err, Err(MapError::InvalidConfig(_))));

        let err = ViewportConfig::from_json_str("{ not json");
        assert!(matches!(err, Err(MapError::Serialization(_))));
    }

    #[test]
    fn test_window_is_clamped() {
        let motion = MotionConfig {
            average_points: 0,
            ..MotionConfig::default()
        };
        assert_eq!(motion.window(), 1);
        let motion = MotionConfig {
            average_points: 100,
            ..MotionConfig::default()
        };
        assert_eq!(motion.window(), MAX_PAN_SAMPLES);
    }
}
