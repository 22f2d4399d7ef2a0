//! Equirectangular HDR sky used as skybox and image-based light.

use bevy::{
    asset::RenderAssetUsages,
    color::ColorToComponents,
    core_pipeline::Skybox,
    prelude::*,
    render::render_resource::{
        Extent3d, TextureDimension, TextureFormat, TextureViewDescriptor, TextureViewDimension,
    },
};
use shared::{
    assets::SceneAsset,
    config::SceneConfig,
    sets::FrameSet,
    sky::{pack_rgba16f, project_equirect_to_cube},
};

use crate::{camera::MainCamera, scene::SceneState};

pub struct SkyPlugin;

impl Plugin for SkyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_environment_map).add_systems(
            Update,
            attach_environment_map_system
                .in_set(FrameSet::Input)
                .run_if(environment_map_ready),
        );
    }
}

pub fn load_environment_map(
    asset_server: Res<AssetServer>,
    config: Res<SceneConfig>,
    mut scene_state: ResMut<SceneState>,
) {
    let path = &config.sky.hdr_path;
    let hdr: Handle<Image> = asset_server.load(path.clone());
    scene_state.track(SceneAsset::EnvironmentMap, path, &hdr);
}

pub fn environment_map_ready(scene_state: Res<SceneState>) -> bool {
    !scene_state.environment_attached && scene_state.tracker.is_ready(SceneAsset::EnvironmentMap)
}

/// Resamples a loaded equirectangular image into a six-layer cube texture.
/// Returns `None` if the source pixels cannot be read.
pub fn equirect_to_cubemap(source: &Image, face_size: u32) -> Option<Image> {
    let (width, height) = (source.width(), source.height());
    if width == 0 || height == 0 || face_size == 0 {
        return None;
    }

    let mut unreadable = false;
    let texels = project_equirect_to_cube(width, height, face_size, |x, y| {
        match source.get_color_at(x, y) {
            Ok(color) => color.to_linear().to_f32_array(),
            Err(_) => {
                unreadable = true;
                [0.0; 4]
            }
        }
    });
    if unreadable {
        return None;
    }

    let mut cubemap = Image::new(
        Extent3d {
            width: face_size,
            height: face_size,
            depth_or_array_layers: 6,
        },
        TextureDimension::D2,
        pack_rgba16f(&texels),
        TextureFormat::Rgba16Float,
        RenderAssetUsages::RENDER_WORLD,
    );
    cubemap.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    Some(cubemap)
}

/// Converts the loaded sky and attaches it to the main camera.
pub fn attach_environment_map_system(
    mut commands: Commands,
    config: Res<SceneConfig>,
    mut scene_state: ResMut<SceneState>,
    mut images: ResMut<Assets<Image>>,
    camera: Query<Entity, With<MainCamera>>,
) {
    let Ok(camera) = camera.single() else {
        debug!("Camera not found");
        return;
    };
    scene_state.environment_attached = true;

    let Some(hdr) = scene_state
        .handle(SceneAsset::EnvironmentMap)
        .map(|handle| handle.clone().typed::<Image>())
    else {
        return;
    };
    let Some(source) = images.get(&hdr) else {
        warn!("Environment map reported loaded but is missing from storage");
        return;
    };

    let Some(cubemap) = equirect_to_cubemap(source, config.sky.face_size) else {
        let reason = format!("unsupported pixel format {:?}", source.texture_descriptor.format);
        if let Some(error) = scene_state.tracker.mark_failed(SceneAsset::EnvironmentMap, reason) {
            warn!("{error}; continuing without a sky");
        }
        return;
    };
    let cubemap = images.add(cubemap);

    commands.entity(camera).insert((
        Skybox {
            image: cubemap.clone(),
            brightness: config.sky.brightness,
            rotation: Quat::IDENTITY,
        },
        EnvironmentMapLight {
            diffuse_map: cubemap.clone(),
            specular_map: cubemap,
            intensity: config.sky.environment_intensity,
            ..default()
        },
    ));

    info!("Sky cubemap attached ({}px faces)", config.sky.face_size);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_panorama(width: u32, height: u32) -> Image {
        // Red channel encodes the row so the cube faces can be checked.
        let mut data = Vec::with_capacity((width * height * 16) as usize);
        for y in 0..height {
            for _ in 0..width {
                for channel in [y as f32 / height as f32, 0.0, 0.0, 1.0] {
                    data.extend_from_slice(&channel.to_le_bytes());
                }
            }
        }
        Image::new(
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            data,
            TextureFormat::Rgba32Float,
            RenderAssetUsages::MAIN_WORLD,
        )
    }

    #[test]
    fn test_cubemap_layout() {
        let cubemap = equirect_to_cubemap(&gradient_panorama(32, 16), 8).unwrap();
        assert_eq!(cubemap.texture_descriptor.size.depth_or_array_layers, 6);
        assert_eq!(cubemap.width(), 8);
        assert_eq!(cubemap.texture_descriptor.format, TextureFormat::Rgba16Float);
        assert_eq!(cubemap.data.as_ref().map(Vec::len), Some(6 * 8 * 8 * 8));
        assert_eq!(
            cubemap
                .texture_view_descriptor
                .as_ref()
                .and_then(|descriptor| descriptor.dimension),
            Some(TextureViewDimension::Cube)
        );
    }

    #[test]
    fn test_empty_face_size_is_rejected() {
        assert!(equirect_to_cubemap(&gradient_panorama(4, 2), 0).is_none());
    }
}
