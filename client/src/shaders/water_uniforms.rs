//! Per-frame values the ocean fragment shader reads at binding 100.
//!
//! `ShaderType` emits layout checks nothing calls, hence the module-wide
//! `dead_code` allowance.

#![allow(dead_code)]

use bevy::{prelude::*, render::render_resource::ShaderType};
use shared::water::{hex_to_rgb8, WaterSettings};

/// Mirrors `OceanWaterUniform` in `ocean_water.wgsl`, field for field.
#[derive(ShaderType, Debug, Clone, Copy)]
pub struct OceanWaterUniform {
    /// Unit vector toward the sun, w unused
    pub sun_direction: Vec4,
    /// Linear colour of the sun highlight
    pub sun_color: Vec4,
    /// Linear colour of the water body
    pub water_color: Vec4,
    /// Simulated time, advanced once per frame
    pub time: f32,
    pub distortion_scale: f32,
    pub alpha: f32,
    /// World-to-normal-map coordinate scale
    pub size: f32,
}

impl OceanWaterUniform {
    pub fn from_settings(settings: &WaterSettings) -> Self {
        Self {
            sun_direction: Vec4::new(0.0, 1.0, 0.0, 0.0),
            sun_color: linear_from_hex(settings.sun_color),
            water_color: linear_from_hex(settings.water_color),
            time: 0.0,
            distortion_scale: settings.distortion_scale,
            alpha: settings.alpha,
            size: settings.wave_scale,
        }
    }
}

/// Converts `0xRRGGBB` sRGB into a linear RGBA vector with alpha 1.
pub fn linear_from_hex(color: u32) -> Vec4 {
    let [r, g, b] = hex_to_rgb8(color);
    let linear = Color::srgb_u8(r, g, b).to_linear();
    Vec4::new(linear.red, linear.green, linear.blue, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linear_from_hex_extremes() {
        assert_eq!(linear_from_hex(0xFFFFFF), Vec4::ONE);
        assert_eq!(linear_from_hex(0x000000), Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_uniform_from_settings() {
        let uniform = OceanWaterUniform::from_settings(&WaterSettings::default());
        assert_eq!(uniform.time, 0.0);
        assert_abs_diff_eq!(uniform.distortion_scale, 3.7);
        assert_eq!(uniform.sun_direction.truncate(), Vec3::Y);
        // 0xFFDDBC is warm: red above blue
        assert!(uniform.sun_color.x > uniform.sun_color.z);
    }
}
