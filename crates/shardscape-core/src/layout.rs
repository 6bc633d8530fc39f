//! Hero scene layout and model sources

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::crystal::CrystalState;
use crate::route::Route;

/// Model file formats the asset pipeline knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    #[default]
    Glb,
    Obj,
    Fbx,
}

impl ModelFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ModelFormat::Glb => "glb",
            ModelFormat::Obj => "obj",
            ModelFormat::Fbx => "fbx",
        }
    }
}

/// Where a model lives under the asset root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSource {
    #[serde(default)]
    pub prefix: String,
    pub name: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub format: ModelFormat,
}

impl ModelSource {
    pub fn glb(name: &str) -> Self {
        Self {
            prefix: String::new(),
            name: name.to_string(),
            suffix: String::new(),
            format: ModelFormat::Glb,
        }
    }

    /// Asset path, e.g. `models/inner_Crystal_a.glb`
    pub fn path(&self) -> String {
        format!(
            "models/{}{}{}.{}",
            self.prefix,
            self.name,
            self.suffix,
            self.format.extension()
        )
    }
}

/// One crystal placement in group space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrystalSpec {
    pub model: ModelSource,
    pub position: Vec3,
    /// Euler XYZ in radians
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default)]
    pub route: Option<Route>,
}

impl CrystalSpec {
    fn new(model: &str, position: [f32; 3], tilt: f32, route: Option<&str>) -> Self {
        Self {
            model: ModelSource::glb(model),
            position: Vec3::from_array(position),
            rotation: Vec3::new(0.0, 0.0, tilt),
            route: route.map(Route::new),
        }
    }

    pub fn state(&self) -> CrystalState {
        CrystalState::new(self.position, self.rotation, self.route.clone())
    }
}

/// Non-interactive ring that travels with the crystals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSpec {
    pub model: ModelSource,
    pub position: Vec3,
    pub scale: f32,
}

impl Default for RingSpec {
    fn default() -> Self {
        Self {
            model: ModelSource::glb("Broken_ring"),
            position: Vec3::new(0.0, -2.0, 0.0),
            scale: 2.25,
        }
    }
}

pub const INNER_CRYSTAL: &str = "inner_Crystal_a";
pub const OUTER_CRYSTAL: &str = "outer-Crystal_a";

/// The default five-crystal arrangement
pub fn default_crystals() -> Vec<CrystalSpec> {
    vec![
        CrystalSpec::new(INNER_CRYSTAL, [0.0, 3.15, 0.0], 0.0, Some("/about")),
        CrystalSpec::new(INNER_CRYSTAL, [-1.0, 2.25, 0.0], 0.6, Some("/works")),
        CrystalSpec::new(OUTER_CRYSTAL, [-2.25, -1.0, 0.0], 1.2, None),
        CrystalSpec::new(INNER_CRYSTAL, [1.0, 2.25, 0.0], -0.6, Some("/store")),
        CrystalSpec::new(OUTER_CRYSTAL, [2.25, -1.0, 0.0], -1.2, None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Page;

    #[test]
    fn test_model_paths() {
        assert_eq!(ModelSource::glb(INNER_CRYSTAL).path(), "models/inner_Crystal_a.glb");

        let fbx = ModelSource {
            prefix: "lod0_".to_string(),
            name: "Broken_ring".to_string(),
            suffix: "_v2".to_string(),
            format: ModelFormat::Fbx,
        };
        assert_eq!(fbx.path(), "models/lod0_Broken_ring_v2.fbx");
    }

    #[test]
    fn test_default_layout_routes_resolve_to_pages() {
        let crystals = default_crystals();
        assert_eq!(crystals.len(), 5);

        let routed: Vec<Page> = crystals
            .iter()
            .filter_map(|c| c.route.as_ref())
            .filter_map(|r| Page::from_path(r.as_str()))
            .collect();
        assert_eq!(routed, vec![Page::About, Page::Works, Page::Store]);
    }

    #[test]
    fn test_outer_crystals_are_decorative() {
        for spec in default_crystals() {
            if spec.model.name == OUTER_CRYSTAL {
                assert!(spec.route.is_none());
                assert!(spec.state().label().is_none());
            }
        }
    }
}
