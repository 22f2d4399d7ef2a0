//! Scroll-driven camera depth.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_MAX_DEPTH, CAMERA_MIN_DEPTH, CAMERA_NEAR,
    PIXELS_PER_SCROLL_LINE, SCROLL_SENSITIVITY,
};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial depth (z) of the camera
    pub start_depth: f32,
    /// World units moved per pixel of wheel delta
    pub scroll_sensitivity: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            start_depth: CAMERA_MAX_DEPTH,
            scroll_sensitivity: SCROLL_SENSITIVITY,
            min_depth: CAMERA_MIN_DEPTH,
            max_depth: CAMERA_MAX_DEPTH,
        }
    }
}

impl CameraSettings {
    /// New camera depth after a wheel delta, clamped to the allowed range.
    ///
    /// `delta_y` uses browser conventions: positive means scrolling down,
    /// which moves the camera back toward `max_depth`.
    pub fn apply_scroll(&self, depth: f32, delta_y: f32) -> f32 {
        apply_scroll(depth, delta_y, self.scroll_sensitivity, self.min_depth, self.max_depth)
    }

    /// Copy that is safe to scroll with: inverted or non-finite depth limits
    /// and a non-finite sensitivity fall back to the defaults, and the start
    /// depth is pulled into the depth range.
    pub fn validated(&self) -> Self {
        let defaults = Self::default();
        let mut settings = self.clone();

        let limits_usable = settings.min_depth.is_finite()
            && settings.max_depth.is_finite()
            && settings.min_depth <= settings.max_depth;
        if !limits_usable {
            settings.min_depth = defaults.min_depth;
            settings.max_depth = defaults.max_depth;
        }
        if !settings.scroll_sensitivity.is_finite() {
            settings.scroll_sensitivity = defaults.scroll_sensitivity;
        }
        settings.start_depth = if settings.start_depth.is_finite() {
            settings.start_depth.clamp(settings.min_depth, settings.max_depth)
        } else {
            settings.max_depth
        };
        settings
    }
}

#[inline]
pub fn apply_scroll(depth: f32, delta_y: f32, sensitivity: f32, min: f32, max: f32) -> f32 {
    (depth + delta_y * sensitivity).clamp(min, max)
}

/// Unit of a raw wheel reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelUnit {
    Line,
    Pixel,
}

/// Converts a wheel reading (positive = scroll up) to a browser-style `deltaY`.
pub fn wheel_to_delta_y(unit: WheelUnit, y: f32) -> f32 {
    match unit {
        WheelUnit::Line => -y * PIXELS_PER_SCROLL_LINE,
        WheelUnit::Pixel => -y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_scroll_within_range() {
        let settings = CameraSettings::default();
        assert_abs_diff_eq!(settings.apply_scroll(0.0, -1000.0), -50.0);
    }

    #[test]
    fn test_scroll_clamps_to_far_limit() {
        let settings = CameraSettings::default();
        assert_eq!(settings.apply_scroll(-780.0, -1000.0), -800.0);
    }

    #[test]
    fn test_scroll_clamps_to_near_limit() {
        let settings = CameraSettings::default();
        assert_eq!(settings.apply_scroll(-10.0, 500.0), 0.0);
    }

    #[test]
    fn test_scroll_matches_formula() {
        let settings = CameraSettings::default();
        for (p, d) in [(0.0, 0.0), (-400.0, 120.0), (-123.0, -3.0), (-799.0, 40.0)] {
            let expected = (p + d * 0.05_f32).clamp(-800.0, 0.0);
            assert_abs_diff_eq!(settings.apply_scroll(p, d), expected);
        }
    }

    #[test]
    fn test_validated_keeps_good_settings() {
        let settings = CameraSettings {
            start_depth: -200.0,
            min_depth: -400.0,
            ..Default::default()
        };
        assert_eq!(settings.validated(), settings);
    }

    #[test]
    fn test_validated_replaces_inverted_limits() {
        let settings = CameraSettings {
            min_depth: 0.0,
            max_depth: -800.0,
            ..Default::default()
        }
        .validated();
        assert_eq!(settings.min_depth, CAMERA_MIN_DEPTH);
        assert_eq!(settings.max_depth, CAMERA_MAX_DEPTH);
        assert_abs_diff_eq!(settings.apply_scroll(0.0, -100.0), -5.0);
    }

    #[test]
    fn test_validated_replaces_nan_values() {
        let settings = CameraSettings {
            min_depth: f32::NAN,
            scroll_sensitivity: f32::INFINITY,
            start_depth: f32::NAN,
            ..Default::default()
        }
        .validated();
        assert_eq!(settings, CameraSettings::default());
        assert_eq!(settings.apply_scroll(-790.0, -1000.0), -800.0);
    }

    #[test]
    fn test_validated_pulls_start_depth_into_range() {
        let settings = CameraSettings {
            start_depth: 50.0,
            ..Default::default()
        };
        assert_eq!(settings.validated().start_depth, 0.0);
    }

    #[test]
    fn test_wheel_conversion() {
        assert_eq!(wheel_to_delta_y(WheelUnit::Pixel, 12.0), -12.0);
        assert_eq!(wheel_to_delta_y(WheelUnit::Line, -1.0), 100.0);
    }
}
