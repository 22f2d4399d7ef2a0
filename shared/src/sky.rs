//! Projection of an equirectangular panorama onto the six faces of a cubemap.
//!
//! Faces follow the GPU layer order `+X, -X, +Y, -Y, +Z, -Z`. Within a face,
//! texel rows run top to bottom.

use std::f32::consts::{PI, TAU};

use bevy::math::{Vec2, Vec3};
use half::f16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

pub const CUBE_FACES: [CubeFace; 6] = [
    CubeFace::PositiveX,
    CubeFace::NegativeX,
    CubeFace::PositiveY,
    CubeFace::NegativeY,
    CubeFace::PositiveZ,
    CubeFace::NegativeZ,
];

impl CubeFace {
    /// Unnormalized direction through face coordinates `u, v` in [-1, 1],
    /// with `v` growing downward.
    pub fn direction(self, u: f32, v: f32) -> Vec3 {
        match self {
            CubeFace::PositiveX => Vec3::new(1.0, -v, -u),
            CubeFace::NegativeX => Vec3::new(-1.0, -v, u),
            CubeFace::PositiveY => Vec3::new(u, 1.0, v),
            CubeFace::NegativeY => Vec3::new(u, -1.0, -v),
            CubeFace::PositiveZ => Vec3::new(u, -v, 1.0),
            CubeFace::NegativeZ => Vec3::new(-u, -v, -1.0),
        }
    }
}

/// Normalized direction through the centre of texel `(x, y)` of a face.
pub fn texel_direction(face: CubeFace, x: u32, y: u32, face_size: u32) -> Vec3 {
    let size = face_size.max(1) as f32;
    let u = 2.0 * (x as f32 + 0.5) / size - 1.0;
    let v = 2.0 * (y as f32 + 0.5) / size - 1.0;
    face.direction(u, v).normalize()
}

/// Panorama coordinates in [0, 1] for a unit direction. The centre of the
/// image faces -Z and the top row is the zenith.
pub fn equirect_uv(direction: Vec3) -> Vec2 {
    let u = 0.5 + direction.x.atan2(-direction.z) / TAU;
    let v = direction.y.clamp(-1.0, 1.0).acos() / PI;
    Vec2::new(u, v)
}

/// Nearest texel for panorama coordinates. `u` wraps, `v` clamps.
pub fn equirect_texel(uv: Vec2, width: u32, height: u32) -> (u32, u32) {
    let width = width.max(1);
    let height = height.max(1);
    let x = (uv.x * width as f32).floor() as i64;
    let y = (uv.y * height as f32).floor() as i64;
    (
        x.rem_euclid(width as i64) as u32,
        y.clamp(0, height as i64 - 1) as u32,
    )
}

/// Resamples a panorama into `6 * face_size * face_size` texels, face by face.
///
/// `sample` reads the panorama texel at `(x, y)`.
pub fn project_equirect_to_cube<T, F>(width: u32, height: u32, face_size: u32, mut sample: F) -> Vec<T>
where
    F: FnMut(u32, u32) -> T,
{
    let mut texels = Vec::with_capacity(6 * (face_size as usize).pow(2));
    for face in CUBE_FACES {
        for y in 0..face_size {
            for x in 0..face_size {
                let direction = texel_direction(face, x, y, face_size);
                let (sx, sy) = equirect_texel(equirect_uv(direction), width, height);
                texels.push(sample(sx, sy));
            }
        }
    }
    texels
}

/// Largest finite half-float value.
const F16_MAX: f32 = 65_504.0;

/// Converts to IEEE 754 half precision bits, rounding to nearest even.
/// Values beyond the half range saturate instead of becoming infinite.
pub fn f32_to_f16_bits(value: f32) -> u16 {
    let value = if value.is_finite() {
        value.clamp(-F16_MAX, F16_MAX)
    } else if value.is_nan() {
        value
    } else {
        value.signum() * F16_MAX
    };
    f16::from_f32(value).to_bits()
}

/// Packs linear RGBA texels as little-endian `Rgba16Float` bytes.
pub fn pack_rgba16f(texels: &[[f32; 4]]) -> Vec<u8> {
    texels
        .iter()
        .flatten()
        .flat_map(|channel| f32_to_f16_bits(*channel).to_le_bytes())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_face_centres_are_axes() {
        let expected = [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z];
        for (face, axis) in CUBE_FACES.into_iter().zip(expected) {
            assert_eq!(face.direction(0.0, 0.0).normalize(), axis);
        }
    }

    #[test]
    fn test_texel_directions_are_unit() {
        for face in CUBE_FACES {
            for (x, y) in [(0, 0), (3, 7), (7, 7)] {
                let dir = texel_direction(face, x, y, 8);
                assert_abs_diff_eq!(dir.length(), 1.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_equirect_poles_and_horizon() {
        assert_abs_diff_eq!(equirect_uv(Vec3::Y).y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(equirect_uv(-Vec3::Y).y, 1.0, epsilon = 1e-6);

        let ahead = equirect_uv(-Vec3::Z);
        assert_abs_diff_eq!(ahead.x, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(ahead.y, 0.5, epsilon = 1e-6);

        assert_abs_diff_eq!(equirect_uv(Vec3::X).x, 0.75, epsilon = 1e-6);
    }

    #[test]
    fn test_texel_wraps_horizontally() {
        assert_eq!(equirect_texel(Vec2::new(1.0, 0.5), 64, 32), (0, 16));
        assert_eq!(equirect_texel(Vec2::new(-0.01, 0.5), 64, 32), (63, 16));
        assert_eq!(equirect_texel(Vec2::new(0.5, 1.0), 64, 32), (32, 31));
    }

    #[test]
    fn test_projection_samples_sky_rows_for_top_face() {
        // Panorama whose value is its row index: the top face should only
        // see rows from the upper half.
        let (width, height, face) = (64, 32, 4);
        let texels = project_equirect_to_cube(width, height, face, |_, y| y);
        assert_eq!(texels.len(), 6 * 16);

        let per_face = (face * face) as usize;
        let top = &texels[2 * per_face..3 * per_face];
        assert!(top.iter().all(|row| *row < height / 2));
        let bottom = &texels[3 * per_face..4 * per_face];
        assert!(bottom.iter().all(|row| *row >= height / 2));
    }

    #[test]
    fn test_half_float_conversion() {
        assert_eq!(f32_to_f16_bits(0.0), 0x0000);
        assert_eq!(f32_to_f16_bits(1.0), 0x3C00);
        assert_eq!(f32_to_f16_bits(0.5), 0x3800);
        assert_eq!(f32_to_f16_bits(-2.0), 0xC000);
        assert_eq!(f32_to_f16_bits(65_504.0), 0x7BFF);
        assert_eq!(f32_to_f16_bits(1.0e6), 0x7BFF);
        assert_eq!(f32_to_f16_bits(f32::INFINITY), 0x7BFF);
        assert_eq!(f32_to_f16_bits(1.0e-8), 0x0000);
    }

    #[test]
    fn test_half_float_rounds_ties_to_even() {
        // 1 + 2^-11 sits exactly between 0x3C00 and 0x3C01.
        assert_eq!(f32_to_f16_bits(1.0 + 2.0_f32.powi(-11)), 0x3C00);
        assert_eq!(f32_to_f16_bits(1.0 + 3.0 * 2.0_f32.powi(-11)), 0x3C02);
    }

    #[test]
    fn test_half_float_keeps_subnormals() {
        assert_eq!(f32_to_f16_bits(3.0e-5), 0x01F7);
        assert_eq!(f32_to_f16_bits(-3.0e-5), 0x81F7);
    }

    #[test]
    fn test_pack_rgba16f_layout() {
        let bytes = pack_rgba16f(&[[1.0, 0.0, 0.5, 1.0]]);
        assert_eq!(bytes, vec![0x00, 0x3C, 0x00, 0x00, 0x00, 0x38, 0x00, 0x3C]);
    }
}
