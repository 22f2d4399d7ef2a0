//! Physical material overrides applied to named nodes of the loaded model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::water::hex_to_rgb8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialOverride {
    /// sRGB colour as `0xRRGGBB`
    pub color: u32,
    pub metalness: f32,
    pub roughness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub ior: f32,
    /// Fraction of light transmitted through the surface
    pub transmission: f32,
    pub thickness: f32,
    pub opacity: f32,
    /// `opacity` only takes effect on transparent materials
    pub transparent: bool,
    pub double_sided: bool,
}

impl Default for MaterialOverride {
    fn default() -> Self {
        Self {
            color: 0xFFFFFF,
            metalness: 0.0,
            roughness: 1.0,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            ior: 1.5,
            transmission: 0.0,
            thickness: 0.0,
            opacity: 1.0,
            transparent: false,
            double_sided: false,
        }
    }
}

impl MaterialOverride {
    /// Splits `color` into its 8-bit sRGB channels.
    pub fn rgb8(&self) -> [u8; 3] {
        hex_to_rgb8(self.color)
    }
}

pub fn default_material_overrides() -> BTreeMap<String, MaterialOverride> {
    let mut overrides = BTreeMap::new();
    overrides.insert(
        "ball".to_string(),
        MaterialOverride {
            color: 0xFFC0CB,
            metalness: 0.3,
            roughness: 0.7,
            clearcoat: 1.0,
            clearcoat_roughness: 0.1,
            ior: 1.5,
            ..Default::default()
        },
    );
    overrides.insert(
        "sea".to_string(),
        MaterialOverride {
            color: 0x006994,
            metalness: 0.0,
            roughness: 0.2,
            transmission: 0.1,
            thickness: 1.0,
            opacity: 0.1,
            ior: 1.33,
            double_sided: true,
            ..Default::default()
        },
    );
    overrides
}

/// Finds the override for a mesh entity. GLTF meshes may carry the node name
/// themselves or sit directly under the named node, so the entity's own name
/// wins over its parent's.
pub fn find_override<'a>(
    overrides: &'a BTreeMap<String, MaterialOverride>,
    own_name: Option<&str>,
    parent_name: Option<&str>,
) -> Option<(&'a str, &'a MaterialOverride)> {
    [own_name, parent_name]
        .into_iter()
        .flatten()
        .find_map(|name| overrides.get_key_value(name))
        .map(|(name, material)| (name.as_str(), material))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb8_splits_channels() {
        let material = MaterialOverride {
            color: 0x006994,
            ..Default::default()
        };
        assert_eq!(material.rgb8(), [0x00, 0x69, 0x94]);
    }

    #[test]
    fn test_defaults_cover_ball_and_sea() {
        let overrides = default_material_overrides();
        assert_eq!(overrides["ball"].clearcoat, 1.0);
        assert!(overrides["sea"].double_sided);
        assert_eq!(overrides["sea"].ior, 1.33);
    }

    #[test]
    fn test_lookup_prefers_own_name() {
        let overrides = default_material_overrides();
        let (name, _) = find_override(&overrides, Some("sea"), Some("ball")).unwrap();
        assert_eq!(name, "sea");
    }

    #[test]
    fn test_lookup_falls_back_to_parent() {
        let overrides = default_material_overrides();
        let (name, material) = find_override(&overrides, Some("ball.0"), Some("ball")).unwrap();
        assert_eq!(name, "ball");
        assert_eq!(material.metalness, 0.3);
    }

    #[test]
    fn test_lookup_without_match() {
        let overrides = default_material_overrides();
        assert!(find_override(&overrides, Some("rock"), None).is_none());
        assert!(find_override(&overrides, None, None).is_none());
    }
}
