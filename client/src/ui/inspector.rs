use bevy::{prelude::*, window::PrimaryWindow};
use bevy_inspector_egui::{
    bevy_egui::{EguiContext, EguiPlugin},
    bevy_inspector::ui_for_resource,
    DefaultInspectorConfigPlugin,
};
use shared::{sun::SunParameters, time::SimulatedTime};

/// Live editor for the sun angles.
pub struct InspectorPlugin;

impl Plugin for InspectorPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: false,
        })
        .add_plugins(DefaultInspectorConfigPlugin)
        .register_type::<SunParameters>()
        .add_systems(Update, inspector_ui);
    }
}

pub fn inspector_ui(world: &mut World) {
    let Ok(egui_context) = world
        .query_filtered::<&mut EguiContext, With<PrimaryWindow>>()
        .single(world)
    else {
        return;
    };
    let mut egui_context = egui_context.clone();

    egui::Window::new("Sun").show(egui_context.get_mut(), |ui| {
        ui_for_resource::<SunParameters>(world, ui);

        if let Some(time) = world.get_resource::<SimulatedTime>() {
            ui.separator();
            ui.label(format!(
                "frame {} / t = {:.2}",
                time.frames(),
                time.elapsed()
            ));
        }
    });
}
