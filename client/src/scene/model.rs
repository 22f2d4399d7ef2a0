use bevy::{prelude::*, scene::SceneInstanceReady};
use shared::{
    assets::SceneAsset,
    config::SceneConfig,
    materials::{find_override, MaterialOverride},
};

use super::SceneState;

/// Marker for the root of the loaded GLTF scene.
#[derive(Component)]
pub struct ModelRoot;

pub fn spawn_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<SceneConfig>,
    mut scene_state: ResMut<SceneState>,
) {
    let model = &config.model;
    let scene: Handle<Scene> =
        asset_server.load(GltfAssetLabel::Scene(0).from_asset(model.path.clone()));
    scene_state.track(SceneAsset::Model, &model.path, &scene);

    commands
        .spawn((
            Name::new("Model"),
            ModelRoot,
            SceneRoot(scene),
            Transform::from_xyz(0.0, 0.0, model.depth).with_scale(Vec3::splat(model.scale)),
        ))
        .observe(apply_material_overrides);
}

/// Builds the PBR material described by an override.
pub fn standard_material_from_override(material: &MaterialOverride) -> StandardMaterial {
    let [r, g, b] = material.rgb8();
    let (alpha, alpha_mode) = if material.transparent {
        (material.opacity.clamp(0.0, 1.0), AlphaMode::Blend)
    } else {
        (1.0, AlphaMode::Opaque)
    };

    StandardMaterial {
        base_color: Color::srgb_u8(r, g, b).with_alpha(alpha),
        metallic: material.metalness,
        perceptual_roughness: material.roughness,
        clearcoat: material.clearcoat,
        clearcoat_perceptual_roughness: material.clearcoat_roughness,
        ior: material.ior,
        specular_transmission: material.transmission,
        thickness: material.thickness,
        double_sided: material.double_sided,
        cull_mode: if material.double_sided {
            None
        } else {
            Some(bevy::render::render_resource::Face::Back)
        },
        alpha_mode,
        ..default()
    }
}

/// Replaces the materials of named meshes once the model has been instanced.
pub fn apply_material_overrides(
    trigger: Trigger<SceneInstanceReady>,
    config: Res<SceneConfig>,
    children: Query<&Children>,
    meshes: Query<(Option<&Name>, Option<&ChildOf>), With<MeshMaterial3d<StandardMaterial>>>,
    names: Query<&Name>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    let overrides = &config.model.materials;
    let mut applied = 0;

    for entity in children.iter_descendants(trigger.target()) {
        let Ok((name, child_of)) = meshes.get(entity) else {
            continue;
        };
        let parent_name = child_of.and_then(|child_of| names.get(child_of.parent()).ok());

        let Some((node, material)) = find_override(
            overrides,
            name.map(Name::as_str),
            parent_name.map(Name::as_str),
        ) else {
            continue;
        };

        debug!("Applying material override '{node}' to {entity}");
        commands
            .entity(entity)
            .insert(MeshMaterial3d(materials.add(standard_material_from_override(material))));
        applied += 1;
    }

    info!("Model ready, {applied} material override(s) applied");
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::materials::default_material_overrides;

    #[test]
    fn test_sea_override_is_double_sided() {
        let overrides = default_material_overrides();
        let material = standard_material_from_override(&overrides["sea"]);
        assert!(material.double_sided);
        assert!(material.cull_mode.is_none());
        assert_eq!(material.ior, 1.33);
        assert_eq!(material.specular_transmission, 0.1);
        // Not transparent, so the 0.1 opacity is ignored
        assert_eq!(material.alpha_mode, AlphaMode::Opaque);
        assert_eq!(material.base_color.alpha(), 1.0);
    }

    #[test]
    fn test_ball_override_has_clearcoat() {
        let overrides = default_material_overrides();
        let material = standard_material_from_override(&overrides["ball"]);
        assert_eq!(material.clearcoat, 1.0);
        assert_eq!(material.clearcoat_perceptual_roughness, 0.1);
        assert_eq!(material.metallic, 0.3);
        assert!(material.cull_mode.is_some());
    }

    #[test]
    fn test_transparent_override_blends() {
        let material = standard_material_from_override(&MaterialOverride {
            transparent: true,
            opacity: 0.25,
            ..Default::default()
        });
        assert_eq!(material.alpha_mode, AlphaMode::Blend);
        assert!((material.base_color.alpha() - 0.25).abs() < 1e-6);
    }
}
