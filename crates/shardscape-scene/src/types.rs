//! Shared resources, messages and states for the hero scene

use bevy::prelude::*;
use shardscape_core::{CursorAffordance, Page, Route, SceneConfig};

/// Scene configuration shared by every system
#[derive(Debug, Clone, Resource, Default, Deref)]
pub struct SceneSettings(pub SceneConfig);

/// Page currently shown. The hero scene only exists on the home page.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActivePage(pub Page);

/// Label of the hovered crystal, for the page chrome
#[derive(Debug, Clone, PartialEq, Eq, Resource, Default)]
pub struct HoveredLabel(pub Option<String>);

/// Cursor the host window should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Resource, Default)]
pub struct DesiredCursor(pub CursorAffordance);

/// Crystal currently under the pointer
#[derive(Debug, Clone, Copy, Resource, Default)]
pub struct HoverTarget(pub Option<Entity>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Enter,
    Leave,
    Click,
}

/// Pointer interaction resolved to a crystal
#[derive(Message, Debug, Clone, Copy)]
pub struct CrystalPointer {
    pub crystal: Entity,
    pub action: PointerAction,
}

/// Request to the router, written once per completed exit sequence
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub route: Route,
}

/// Frame ordering of the scene systems
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneSystems {
    /// Turn raw pointer input into `CrystalPointer` messages
    Input,
    /// Apply hover and click state
    Interaction,
    /// Ease transforms and count down timers
    Animation,
}

pub(crate) fn configure_scene_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            SceneSystems::Input,
            SceneSystems::Interaction,
            SceneSystems::Animation,
        )
            .chain(),
    );
}
