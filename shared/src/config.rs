//! Scene configuration, stored as RON next to the assets.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use bevy::prelude::*;
use bevy_log::{info, warn};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::{
    camera::CameraSettings,
    constants::{
        BACKDROP_IMAGE_PATH, CONFIG_FILE_NAME, DEFAULT_SKYBOX_FACE_SIZE, MODEL_PATH, SKY_HDR_PATH,
    },
    error::{ConfigError, PipelineError, SceneError},
    materials::{default_material_overrides, MaterialOverride},
    pipeline::{BloomSettings, FramePipeline, RenderPassKind},
    sun::SunParameters,
    water::WaterSettings,
};

#[derive(Resource, Debug, Clone)]
pub struct ScenePaths {
    pub assets_folder_path: PathBuf,
    pub config_path: PathBuf,
}

impl Default for ScenePaths {
    fn default() -> Self {
        let assets_folder_path = PathBuf::from("assets");
        Self {
            config_path: assets_folder_path.join(CONFIG_FILE_NAME),
            assets_folder_path,
        }
    }
}

/// Resolves paths from optional command line overrides. The config file
/// defaults to `<assets_folder_path>/seascape.ron`.
pub fn get_scene_paths(config_path: Option<String>, assets_folder_path: Option<String>) -> ScenePaths {
    let mut paths = ScenePaths::default();

    if let Some(assets) = assets_folder_path {
        paths.assets_folder_path = assets.into();
        paths.config_path = paths.assets_folder_path.join(CONFIG_FILE_NAME);
    }
    if let Some(config) = config_path {
        paths.config_path = config.into();
    }

    paths
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkySettings {
    /// Equirectangular HDR used as background and environment light
    pub hdr_path: String,
    pub face_size: u32,
    pub brightness: f32,
    pub environment_intensity: f32,
}

impl Default for SkySettings {
    fn default() -> Self {
        Self {
            hdr_path: SKY_HDR_PATH.to_string(),
            face_size: DEFAULT_SKYBOX_FACE_SIZE,
            brightness: 1000.0,
            environment_intensity: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropSettings {
    pub image_path: String,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for BackdropSettings {
    fn default() -> Self {
        Self {
            image_path: BACKDROP_IMAGE_PATH.to_string(),
            width: 18_008.0,
            height: 12_000.0,
            depth: -10_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub path: String,
    pub scale: f32,
    pub depth: f32,
    /// Materials replacing those of meshes with matching node names
    pub materials: BTreeMap<String, MaterialOverride>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            path: MODEL_PATH.to_string(),
            scale: 20.0,
            depth: -600.0,
            materials: default_material_overrides(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientSettings {
    /// sRGB colour, `0xRRGGBB`
    pub color: u32,
    pub brightness: f32,
}

impl Default for AmbientSettings {
    fn default() -> Self {
        Self {
            color: 0xFFFFFF,
            brightness: 400.0,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub sun: SunParameters,
    pub camera: CameraSettings,
    pub water: WaterSettings,
    pub sky: SkySettings,
    pub backdrop: BackdropSettings,
    pub model: ModelSettings,
    pub ambient: AmbientSettings,
    /// Post-processing passes in execution order
    pub pipeline: Vec<RenderPassKind>,
    pub bloom: BloomSettings,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sun: SunParameters::default(),
            camera: CameraSettings::default(),
            water: WaterSettings::default(),
            sky: SkySettings::default(),
            backdrop: BackdropSettings::default(),
            model: ModelSettings::default(),
            ambient: AmbientSettings::default(),
            pipeline: vec![RenderPassKind::Scene],
            bloom: BloomSettings::default(),
        }
    }
}

impl SceneConfig {
    pub fn frame_pipeline(&self) -> Result<FramePipeline, PipelineError> {
        FramePipeline::new(self.pipeline.clone(), self.bloom)
    }

    /// Adds `pass` to the pipeline if missing, keeping the graph order.
    pub fn enable_pass(&mut self, pass: RenderPassKind) {
        if !self.pipeline.contains(&pass) {
            self.pipeline.push(pass);
            self.pipeline.sort_by_key(|kind| kind.rank());
        }
    }
}

pub fn parse_config(content: &str) -> Result<SceneConfig, ConfigError> {
    Ok(ron::from_str(content)?)
}

pub fn read_config(path: &Path) -> Result<SceneConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

pub fn write_config(config: &SceneConfig, path: &Path) -> Result<(), ConfigError> {
    let pretty_config = PrettyConfig::new()
        .with_depth_limit(4)
        .with_separate_tuple_members(true)
        .with_enumerate_arrays(false);

    let serialized = ron::ser::to_string_pretty(config, pretty_config)?;
    let io_error = |source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let mut file = File::create(path).map_err(io_error)?;
    file.write_all(serialized.as_bytes()).map_err(io_error)
}

/// Reads the configuration at `path`. A missing file is replaced by the
/// defaults, which are written back; an unreadable one falls back to the
/// defaults without touching the file.
pub fn load_or_create_config(path: &Path) -> SceneConfig {
    match read_config(path) {
        Ok(config) => {
            info!("Scene configuration loaded from {:?}", path);
            config
        }
        Err(ConfigError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            let config = SceneConfig::default();
            match write_config(&config, path) {
                Ok(()) => info!("Default scene configuration written to {:?}", path),
                Err(e) => warn!("{}", SceneError::from(e)),
            }
            config
        }
        Err(e) => {
            warn!("{}, using defaults", SceneError::from(e));
            SceneConfig::default()
        }
    }
}
