//! Pointer picking: mouse and touch input resolved to crystal hover and click

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use shardscape_core::picking::nearest_hit;

use crate::camera::MainCamera;
use crate::crystals::Crystal;
use crate::types::*;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        configure_scene_sets(app);
        app.init_resource::<TouchState>()
            .init_resource::<HoverTarget>()
            .add_systems(Update, pick_crystals.in_set(SceneSystems::Input));
    }
}

/// Track touch state for tap detection
#[derive(Resource, Default)]
pub struct TouchState {
    /// Position where touch started
    start_position: Option<Vec2>,
    /// Whether this touch has moved far enough to count as a drag
    is_dragging: bool,
}

/// Cast a ray through the cursor, track the hovered crystal and report clicks
fn pick_crystals(
    settings: Res<SceneSettings>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    crystals: Query<(Entity, &GlobalTransform), With<Crystal>>,
    mut contexts: bevy_egui::EguiContexts,
    mut touch_state: ResMut<TouchState>,
    mut hover: ResMut<HoverTarget>,
    mut pointer: MessageWriter<CrystalPointer>,
) {
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);

    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    let hit_at = |position: Vec2| -> Option<Entity> {
        let ray = camera.viewport_to_world(camera_transform, position).ok()?;
        nearest_hit(
            ray.origin,
            *ray.direction,
            settings.picking.hit_radius,
            crystals.iter().map(|(entity, transform)| (entity, transform.translation())),
        )
    };

    let hovered = if egui_wants_pointer {
        None
    } else {
        window.cursor_position().and_then(&hit_at)
    };

    if hovered != hover.0 {
        if let Some(previous) = hover.0 {
            pointer.write(CrystalPointer {
                crystal: previous,
                action: PointerAction::Leave,
            });
        }
        if let Some(current) = hovered {
            pointer.write(CrystalPointer {
                crystal: current,
                action: PointerAction::Enter,
            });
        }
        hover.0 = hovered;
    }

    if mouse_button.just_pressed(MouseButton::Left) {
        if let Some(crystal) = hovered {
            pointer.write(CrystalPointer {
                crystal,
                action: PointerAction::Click,
            });
        }
    }

    // Touch: a press and release without dragging is a tap
    if let Some(touch) = touch_input.iter().next() {
        if touch_input.just_pressed(touch.id()) {
            touch_state.start_position = Some(touch.position());
            touch_state.is_dragging = false;
        } else if let Some(start) = touch_state.start_position {
            if touch.position().distance(start) > settings.picking.tap_slop {
                touch_state.is_dragging = true;
            }
        }
    }

    let mut tap_position = None;
    for touch in touch_input.iter_just_released() {
        if !touch_state.is_dragging {
            tap_position = touch_state.start_position.or(Some(touch.position()));
        }
        touch_state.start_position = None;
        touch_state.is_dragging = false;
    }

    if let Some(position) = tap_position.filter(|_| !egui_wants_pointer) {
        if let Some(crystal) = hit_at(position) {
            pointer.write(CrystalPointer {
                crystal,
                action: PointerAction::Click,
            });
        }
    }
}
