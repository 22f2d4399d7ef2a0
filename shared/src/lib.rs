pub mod assets;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod materials;
pub mod pipeline;
pub mod sets;
pub mod sky;
pub mod sun;
pub mod time;
pub mod water;

pub use constants::*;
pub use error::{ConfigError, PipelineError, SceneError};
