pub mod camera;
pub mod frame_loop;
pub mod scene;
pub mod shaders;
pub mod sky;
pub mod ui;

use bevy::prelude::*;

/// Scene, sky, water, camera control and the frame loop.
pub struct SeascapePlugins;

impl PluginGroup for SeascapePlugins {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(frame_loop::FrameLoopPlugin)
            .add(scene::ScenePlugin)
            .add(camera::CameraControlPlugin)
            .add(shaders::WaterPlugin)
            .add(sky::SkyPlugin)
    }
}
