//! Animated ocean surface.
//!
//! The material extends Bevy's `StandardMaterial` with a fragment shader that
//! perturbs the surface normal with four scrolling samples of a tiling normal
//! map and adds a sun highlight on top of the regular PBR lighting.

use bevy::{
    asset::embedded_asset,
    image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor},
    pbr::{ExtendedMaterial, MaterialExtension},
    prelude::*,
    render::render_resource::{AsBindGroup, ShaderRef},
};
use shared::{
    assets::SceneAsset,
    config::SceneConfig,
    sets::FrameSet,
    sun::SunDirection,
    time::SimulatedTime,
    water::{hex_to_rgb8, WaterSettings},
};

use super::{paths, water_uniforms::OceanWaterUniform};
use crate::scene::SceneState;

/// Plugin that registers the ocean material and keeps its uniforms current.
pub struct WaterPlugin;

impl Plugin for WaterPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "ocean_water.wgsl");

        app.add_plugins(MaterialPlugin::<OceanWaterMaterial>::default())
            .add_systems(Startup, spawn_water)
            .add_systems(Update, sync_water_uniforms_system.in_set(FrameSet::Shade));
    }
}

/// Ocean material extension for the standard PBR pipeline.
#[derive(Asset, AsBindGroup, TypePath, Debug, Clone)]
pub struct OceanWaterExtension {
    #[uniform(100)]
    pub uniform: OceanWaterUniform,

    /// Tiling normal map, sampled with repeat addressing
    #[texture(101)]
    #[sampler(102)]
    pub normals: Handle<Image>,
}

impl MaterialExtension for OceanWaterExtension {
    fn fragment_shader() -> ShaderRef {
        paths::OCEAN_WATER_SHADER.into()
    }

    fn deferred_fragment_shader() -> ShaderRef {
        paths::OCEAN_WATER_SHADER.into()
    }
}

pub type OceanWaterMaterial = ExtendedMaterial<StandardMaterial, OceanWaterExtension>;

/// Builds the ocean material from the configured settings.
pub fn create_ocean_material(settings: &WaterSettings, normals: Handle<Image>) -> OceanWaterMaterial {
    let [r, g, b] = hex_to_rgb8(settings.water_color);
    let alpha_mode = if settings.alpha < 1.0 {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    };

    ExtendedMaterial {
        base: StandardMaterial {
            base_color: Color::srgba_u8(r, g, b, (settings.alpha.clamp(0.0, 1.0) * 255.0) as u8),
            perceptual_roughness: 0.1,
            reflectance: 0.5,
            alpha_mode,
            ..default()
        },
        extension: OceanWaterExtension {
            uniform: OceanWaterUniform::from_settings(settings),
            normals,
        },
    }
}

/// Marker for the water plane entity.
#[derive(Component)]
pub struct WaterSurface;

pub fn spawn_water(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<SceneConfig>,
    mut scene_state: ResMut<SceneState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<OceanWaterMaterial>>,
) {
    let settings = &config.water;

    let normals: Handle<Image> = asset_server.load_with_settings(
        settings.normals_path.clone(),
        |s: &mut ImageLoaderSettings| {
            s.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
                address_mode_u: ImageAddressMode::Repeat,
                address_mode_v: ImageAddressMode::Repeat,
                ..ImageSamplerDescriptor::linear()
            });
        },
    );
    scene_state.track(SceneAsset::WaterNormals, &settings.normals_path, &normals);

    let handle = materials.add(create_ocean_material(settings, normals));

    commands.spawn((
        Name::new("Water"),
        WaterSurface,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(settings.size, settings.size))),
        MeshMaterial3d(handle),
        Transform::from_xyz(0.0, settings.height, 0.0),
    ));

    info!(
        "Water plane spawned ({} x {} at y = {})",
        settings.size, settings.size, settings.height
    );
}

/// Copies the simulated time and sun direction into the ocean uniform.
pub fn sync_water_uniforms_system(
    time: Res<SimulatedTime>,
    sun: Res<SunDirection>,
    water: Query<&MeshMaterial3d<OceanWaterMaterial>, With<WaterSurface>>,
    mut materials: ResMut<Assets<OceanWaterMaterial>>,
) {
    for material in &water {
        let Some(material) = materials.get_mut(&material.0) else {
            debug!("Ocean material not found");
            continue;
        };

        let uniform = &mut material.extension.uniform;
        uniform.time = time.elapsed_f32();
        uniform.sun_direction = sun.0.extend(0.0);
    }
}
