//! Sun direction from elevation/azimuth angles.
//!
//! The polar angle is measured from +Y and the azimuth in the XZ plane,
//! starting at +Z and turning toward +X. An azimuth of 180° therefore points
//! the sun along -Z, which is straight ahead of the default camera.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_SUN_AZIMUTH_DEGREES, DEFAULT_SUN_ELEVATION_DEGREES, MAX_ELEVATION_DEGREES,
    MIN_ELEVATION_DEGREES,
};

/// Angles controlling the sun, editable at runtime.
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct SunParameters {
    /// Degrees above the horizon, in (-90, 90]
    pub elevation_degrees: f32,
    /// Degrees around the vertical axis, in [0, 360)
    pub azimuth_degrees: f32,
}

impl Default for SunParameters {
    fn default() -> Self {
        Self {
            elevation_degrees: DEFAULT_SUN_ELEVATION_DEGREES,
            azimuth_degrees: DEFAULT_SUN_AZIMUTH_DEGREES,
        }
    }
}

impl SunParameters {
    pub fn new(elevation_degrees: f32, azimuth_degrees: f32) -> Self {
        Self {
            elevation_degrees,
            azimuth_degrees,
        }
    }

    /// Returns a copy with elevation clamped and azimuth wrapped into range.
    /// Non-finite angles fall back to their defaults.
    pub fn sanitized(&self) -> Self {
        let elevation = if self.elevation_degrees.is_finite() {
            self.elevation_degrees
                .clamp(MIN_ELEVATION_DEGREES, MAX_ELEVATION_DEGREES)
        } else {
            DEFAULT_SUN_ELEVATION_DEGREES
        };

        let azimuth = if self.azimuth_degrees.is_finite() {
            let wrapped = self.azimuth_degrees.rem_euclid(360.0);
            // rem_euclid can round up to exactly 360 for tiny negative inputs
            if wrapped >= 360.0 {
                0.0
            } else {
                wrapped
            }
        } else {
            DEFAULT_SUN_AZIMUTH_DEGREES
        };

        Self::new(elevation, azimuth)
    }
}

/// Unit vector pointing from the scene toward the sun.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SunDirection(pub Vec3);

impl Default for SunDirection {
    fn default() -> Self {
        Self(Vec3::Y)
    }
}

impl SunDirection {
    /// Overwrites the stored direction from `params`.
    pub fn update_from(&mut self, params: &SunParameters) {
        self.0 = compute_sun_direction(params);
    }
}

/// Converts spherical coordinates to a cartesian vector.
///
/// * `phi` - polar angle from +Y, radians
/// * `theta` - azimuth from +Z toward +X, radians
#[inline]
pub fn spherical_to_cartesian(radius: f32, phi: f32, theta: f32) -> Vec3 {
    let horizontal = phi.sin() * radius;
    Vec3::new(
        horizontal * theta.sin(),
        phi.cos() * radius,
        horizontal * theta.cos(),
    )
}

/// Computes the normalized sun direction for the given angles.
pub fn compute_sun_direction(params: &SunParameters) -> Vec3 {
    let params = params.sanitized();
    let phi = (90.0 - params.elevation_degrees).to_radians();
    let theta = params.azimuth_degrees.to_radians();
    spherical_to_cartesian(1.0, phi, theta).normalize()
}
