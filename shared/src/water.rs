use serde::{Deserialize, Serialize};

use crate::constants::WATER_NORMALS_PATH;

/// Appearance of the animated water plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSettings {
    /// Edge length of the square plane
    pub size: f32,
    /// Height (y) of the plane
    pub height: f32,
    pub normals_path: String,
    /// Scale applied to world coordinates before sampling the normal map
    pub wave_scale: f32,
    pub alpha: f32,
    /// sRGB colour of the sun highlight, `0xRRGGBB`
    pub sun_color: u32,
    /// sRGB colour of the water body, `0xRRGGBB`
    pub water_color: u32,
    /// Strength of the normal-map distortion
    pub distortion_scale: f32,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            size: 10_000.0,
            height: -80.0,
            normals_path: WATER_NORMALS_PATH.to_string(),
            wave_scale: 1.0,
            alpha: 1.0,
            sun_color: 0xFFDDBC,
            water_color: 0x001E0F,
            distortion_scale: 3.7,
        }
    }
}

/// Splits `0xRRGGBB` into 8-bit channels.
pub fn hex_to_rgb8(color: u32) -> [u8; 3] {
    let [_, r, g, b] = color.to_be_bytes();
    [r, g, b]
}
