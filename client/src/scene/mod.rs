//! Scene state and one-shot scene setup.
//!
//! Handles for every asynchronously loaded asset live in [`SceneState`].
//! The frame loop starts before they finish loading, so early frames show a
//! partially populated scene; a failed asset is logged once and its node
//! stays absent.

pub mod model;

use std::collections::BTreeMap;

use bevy::{asset::LoadState, prelude::*};
use shared::{
    assets::{AssetTracker, LoadOutcome, SceneAsset},
    config::SceneConfig,
    sets::FrameSet,
    water::hex_to_rgb8,
};

pub use model::*;

/// Everything the scene owns that outlives a single frame.
#[derive(Resource, Default)]
pub struct SceneState {
    handles: BTreeMap<SceneAsset, UntypedHandle>,
    pub tracker: AssetTracker,
    /// Camera the frame pipeline renders through
    pub camera: Option<Entity>,
    /// Set once the sky cubemap has been attached to the camera
    pub environment_attached: bool,
}

impl SceneState {
    /// Keeps `handle` alive and starts tracking its load state.
    pub fn track<A: Asset>(&mut self, asset: SceneAsset, path: &str, handle: &Handle<A>) {
        self.handles.insert(asset, handle.clone().untyped());
        self.tracker.track(asset, path);
    }

    pub fn handle(&self, asset: SceneAsset) -> Option<&UntypedHandle> {
        self.handles.get(&asset)
    }
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneState>()
            .add_systems(Startup, (setup_ambient_light, spawn_backdrop, spawn_model))
            .add_systems(
                Update,
                poll_scene_assets_system
                    .in_set(FrameSet::Input)
                    .run_if(scene_assets_pending),
            );
    }
}

pub fn setup_ambient_light(mut commands: Commands, config: Res<SceneConfig>) {
    let [r, g, b] = hex_to_rgb8(config.ambient.color);
    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(r, g, b),
        brightness: config.ambient.brightness,
        ..default()
    });
}

/// Marker for the textured plane behind the scene.
#[derive(Component)]
pub struct Backdrop;

pub fn spawn_backdrop(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<SceneConfig>,
    mut scene_state: ResMut<SceneState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let backdrop = &config.backdrop;
    let texture: Handle<Image> = asset_server.load(backdrop.image_path.clone());
    scene_state.track(SceneAsset::Backdrop, &backdrop.image_path, &texture);

    commands.spawn((
        Name::new("Backdrop"),
        Backdrop,
        Mesh3d(meshes.add(Rectangle::new(backdrop.width, backdrop.height))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(texture),
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, backdrop.depth),
    ));
}

pub fn scene_assets_pending(scene_state: Res<SceneState>) -> bool {
    !scene_state.tracker.all_settled()
}

fn load_outcome(state: Option<LoadState>) -> LoadOutcome {
    match state {
        Some(LoadState::Loaded) => LoadOutcome::Loaded,
        Some(LoadState::Failed(error)) => LoadOutcome::Failed(error.to_string()),
        _ => LoadOutcome::StillLoading,
    }
}

/// Moves tracked assets out of `Pending` as the asset server resolves them.
pub fn poll_scene_assets_system(
    asset_server: Res<AssetServer>,
    mut scene_state: ResMut<SceneState>,
) {
    let pending: Vec<SceneAsset> = scene_state.tracker.pending().collect();
    for asset in pending {
        let Some(handle) = scene_state.handle(asset) else {
            continue;
        };
        let outcome = load_outcome(asset_server.get_load_state(handle.id()));
        let loaded = outcome == LoadOutcome::Loaded;

        if let Some(error) = scene_state.tracker.record(asset, outcome) {
            warn!("{error}; continuing without it");
        } else if loaded {
            info!("Loaded {asset}");
        }
    }

    if scene_state.tracker.all_settled() {
        info!("All scene assets settled");
    }
}
