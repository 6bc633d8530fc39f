//! Fixed hero camera with bloom

use bevy::post_process::bloom::{Bloom, BloomPrefilter};
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::render::view::Hdr;
use shardscape_core::EffectsConfig;

use crate::types::SceneSettings;

/// Camera placement settings
#[derive(Debug, Clone, Resource)]
pub struct CameraSettings {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 5.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
        }
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Plugin for the camera
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .add_systems(Startup, spawn_camera);
    }
}

/// Bloom tuned from the effects config
pub fn bloom(effects: &EffectsConfig) -> Bloom {
    Bloom {
        intensity: effects.bloom_intensity,
        prefilter: BloomPrefilter {
            threshold: effects.bloom_threshold,
            threshold_softness: 0.2,
        },
        ..Bloom::NATURAL
    }
}

fn spawn_camera(
    mut commands: Commands,
    settings: Res<CameraSettings>,
    scene: Res<SceneSettings>,
) {
    commands.spawn((
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        bloom(&scene.effects),
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_translation(settings.position).looking_at(settings.target, Vec3::Y),
        // Warm amber fill
        AmbientLight {
            color: Color::srgb_u8(0xff, 0xb6, 0x16),
            brightness: 250.0,
            ..default()
        },
        MainCamera,
    ));
}
