//! Shardscape Scene - Bevy hero scene with clickable crystals
//!
//! This crate wires the engine-independent logic of `shardscape-core` into
//! Bevy: crystal entities with eased hover transforms, pointer picking, and
//! the crystal group that flies away and requests navigation when clicked.
//! The host app owns the router and page chrome; it reads `HoveredLabel` and
//! `DesiredCursor` and consumes `NavigationRequest` messages.

pub mod camera;
pub mod crystals;
pub mod exit;
pub mod interaction;
pub mod scene;
pub mod types;

use bevy::prelude::*;
use shardscape_core::{Page, SceneConfig};

/// Plugin that sets up the hero scene
pub struct ShardscapeScenePlugin {
    pub config: SceneConfig,
    /// Page shown on startup
    pub initial_page: Page,
}

impl Plugin for ShardscapeScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SceneSettings(self.config.clone()))
            .insert_state(ActivePage(self.initial_page))
            .add_plugins(camera::CameraPlugin)
            .add_plugins(scene::SceneSetupPlugin)
            .add_plugins(crystals::CrystalPlugin)
            .add_plugins(exit::ExitPlugin)
            .add_plugins(interaction::InteractionPlugin);
    }
}

// Re-export commonly used types
pub use types::*;
pub use camera::CameraSettings;
pub use crystals::Crystal;
pub use exit::ExitGroup;
