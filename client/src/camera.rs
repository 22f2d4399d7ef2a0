use bevy::{
    core_pipeline::{
        bloom::{Bloom, BloomPrefilter},
        smaa::Smaa,
    },
    input::mouse::{MouseScrollUnit, MouseWheel},
    prelude::*,
};
use shared::{
    camera::{wheel_to_delta_y, CameraSettings, WheelUnit},
    pipeline::{BloomSettings, FramePipeline, RenderPassKind},
    sets::FrameSet,
};

use crate::scene::SceneState;

/// The camera the scene is rendered through.
#[derive(Component)]
pub struct MainCamera;

pub struct CameraControlPlugin;

impl Plugin for CameraControlPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, scroll_camera_system.in_set(FrameSet::Input));
    }
}

pub fn bloom_from_settings(settings: &BloomSettings) -> Bloom {
    Bloom {
        intensity: settings.intensity,
        // A wider radius keeps more of the low-frequency glow
        low_frequency_boost: settings.radius.clamp(0.0, 1.0),
        prefilter: BloomPrefilter {
            threshold: settings.threshold,
            threshold_softness: 0.0,
        },
        ..Bloom::NATURAL
    }
}

/// Spawns the perspective camera with the pipeline's post-processing passes.
pub fn spawn_camera(
    mut commands: Commands,
    settings: Res<CameraSettings>,
    pipeline: Res<FramePipeline>,
    mut scene_state: ResMut<SceneState>,
) {
    let mut camera = commands.spawn((
        Name::new("Main Camera"),
        MainCamera,
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, settings.start_depth),
    ));

    if let Some(bloom) = pipeline.bloom() {
        camera.insert(bloom_from_settings(bloom));
    }
    // SMAA replaces multisampling
    if pipeline.has(RenderPassKind::Smaa) {
        camera.insert((Smaa::default(), Msaa::Off));
    } else {
        camera.insert(Msaa::Sample4);
    }

    scene_state.camera = Some(camera.id());
    info!("Camera spawned with passes {:?}", pipeline.passes());
}

/// Moves the camera along its depth axis from mouse wheel input.
pub fn scroll_camera_system(
    mut wheel: EventReader<MouseWheel>,
    settings: Res<CameraSettings>,
    mut camera: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera.single_mut() else {
        debug!("Camera not found");
        return;
    };

    for event in wheel.read() {
        let unit = match event.unit {
            MouseScrollUnit::Line => WheelUnit::Line,
            MouseScrollUnit::Pixel => WheelUnit::Pixel,
        };
        let delta_y = wheel_to_delta_y(unit, event.y);
        transform.translation.z = settings.apply_scroll(transform.translation.z, delta_y);
    }
}
