//! Custom shaders.
//!
//! ## Ocean shader
//! `ocean_water.wgsl` is embedded into the binary and drives the water plane:
//! - four scrolling normal-map samples for the surface normal
//! - Schlick-style reflectance toward the viewer
//! - a sun highlight fed from `SunDirection`

pub mod water;
pub mod water_uniforms;

pub use water::*;
pub use water_uniforms::*;

pub mod paths {
    /// Embedded path of the ocean surface shader
    pub const OCEAN_WATER_SHADER: &str = "embedded://seascape_client/shaders/ocean_water.wgsl";
}
