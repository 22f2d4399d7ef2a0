//! Per-frame driver: simulated time, sun direction and loop teardown.
//!
//! The host (winit) re-arms the loop on every display refresh. The loop ends
//! when the primary window closes, or when the render camera disappears,
//! which is reported as a render submission failure.

use bevy::{
    prelude::*,
    window::{WindowClosed, WindowResized},
};
use shared::{
    sets::FrameSet,
    sun::{SunDirection, SunParameters},
    time::SimulatedTime,
    SceneError,
};

use crate::{camera::MainCamera, scene::SceneState};

pub struct FrameLoopPlugin;

impl Plugin for FrameLoopPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulatedTime>()
            .init_resource::<SunParameters>()
            .init_resource::<SunDirection>()
            .configure_sets(
                Update,
                (FrameSet::Input, FrameSet::Simulate, FrameSet::Shade).chain(),
            )
            .add_systems(Startup, init_sun_direction)
            .add_systems(
                Update,
                (
                    advance_simulated_time_system,
                    update_sun_direction_system.run_if(resource_changed::<SunParameters>),
                )
                    .in_set(FrameSet::Simulate),
            )
            .add_systems(
                Update,
                (ensure_render_target_system, log_window_events_system).in_set(FrameSet::Shade),
            );
    }
}

pub fn init_sun_direction(params: Res<SunParameters>, mut direction: ResMut<SunDirection>) {
    direction.update_from(&params);
    info!(
        "Sun at elevation {}°, azimuth {}° -> {}",
        params.elevation_degrees, params.azimuth_degrees, direction.0
    );
}

/// Adds one fixed step per frame, independent of the measured frame time.
pub fn advance_simulated_time_system(mut time: ResMut<SimulatedTime>) {
    time.advance();
}

pub fn update_sun_direction_system(params: Res<SunParameters>, mut direction: ResMut<SunDirection>) {
    direction.update_from(&params);
    debug!("Sun direction updated to {}", direction.0);
}

pub fn ensure_render_target_system(
    scene_state: Res<SceneState>,
    cameras: Query<(), With<MainCamera>>,
    mut exit: EventWriter<AppExit>,
    mut reported: Local<bool>,
) {
    let Some(camera) = scene_state.camera else {
        return;
    };
    if *reported || cameras.contains(camera) {
        return;
    }

    *reported = true;
    let error = SceneError::RenderSubmissionFailure(format!("render camera {camera} no longer exists"));
    error!("{error}");
    exit.write(AppExit::error());
}

pub fn log_window_events_system(
    mut resized: EventReader<WindowResized>,
    mut closed: EventReader<WindowClosed>,
) {
    for event in resized.read() {
        debug!("Viewport resized to {}x{}", event.width, event.height);
    }
    for event in closed.read() {
        info!("Window {} closed, stopping the frame loop", event.window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FRAME_TIME_STEP;

    fn simulation_app() -> App {
        let mut app = App::new();
        app.init_resource::<SimulatedTime>()
            .insert_resource(SunParameters::default())
            .init_resource::<SunDirection>()
            .add_systems(
                Update,
                (
                    advance_simulated_time_system,
                    update_sun_direction_system.run_if(resource_changed::<SunParameters>),
                ),
            );
        app
    }

    #[test]
    fn test_time_advances_one_step_per_frame() {
        let mut app = simulation_app();
        for _ in 0..90 {
            app.update();
        }
        let time = app.world().resource::<SimulatedTime>();
        assert_eq!(time.frames(), 90);
        assert_eq!(time.elapsed(), 90.0 * FRAME_TIME_STEP);
    }

    #[test]
    fn test_sun_follows_parameter_changes() {
        let mut app = simulation_app();
        app.update();
        let initial = app.world().resource::<SunDirection>().0;
        assert!(initial.z < -0.99);

        app.world_mut().resource_mut::<SunParameters>().elevation_degrees = 90.0;
        app.update();
        let overhead = app.world().resource::<SunDirection>().0;
        assert!((overhead - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_missing_camera_stops_the_loop() {
        let mut app = App::new();
        let camera = app.world_mut().spawn(MainCamera).id();
        let mut scene_state = SceneState::default();
        scene_state.camera = Some(camera);
        app.insert_resource(scene_state)
            .add_systems(Update, ensure_render_target_system);

        app.update();
        assert!(app.should_exit().is_none());

        app.world_mut().despawn(camera);
        app.update();
        assert!(matches!(app.should_exit(), Some(AppExit::Error(_))));
    }
}
