//! Bevy application setup

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_picking::DefaultPickingPlugins;
use shardscape_core::SceneConfig;
use shardscape_scene::ShardscapeScenePlugin;

use crate::router::{Router, RouterPlugin};
use crate::ui::UiPlugin;

/// Scene configuration shipped with the app
pub const EMBEDDED_CONFIG: &str = include_str!("../assets/shardscape.toml");

/// Parse the embedded configuration, falling back to built-in defaults
pub fn embedded_config() -> SceneConfig {
    SceneConfig::from_toml_str(EMBEDDED_CONFIG).unwrap_or_else(|err| {
        tracing::warn!(%err, "Embedded scene config rejected, using defaults");
        SceneConfig::default()
    })
}

/// Run the Bevy application
pub fn run(config: SceneConfig) {
    let mut router = Router::for_platform();
    let initial_page = router.settle();
    tracing::info!(?initial_page, route = %router.current(), "Starting");

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.06, 0.04, 0.09)))
        .add_plugins(DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Shardscape".to_string(),
                    canvas: Some("#shardscape-canvas".to_string()),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: false,
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                // Static hosting serves no .meta files
                meta_check: bevy::asset::AssetMetaCheck::Never,
                ..default()
            })
        )
        // EguiPlugin looks for PickingPlugin when it is built
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(EguiPlugin::default())
        .insert_resource(router)
        .add_plugins(ShardscapeScenePlugin {
            config,
            initial_page,
        })
        .add_plugins(RouterPlugin)
        .add_plugins(UiPlugin)
        .run();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_valid() {
        let config = SceneConfig::from_toml_str(EMBEDDED_CONFIG).unwrap();
        assert_eq!(config, SceneConfig::default());
    }
}
