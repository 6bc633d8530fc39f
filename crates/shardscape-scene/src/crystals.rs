//! Crystal entities: hover state, labels and eased hover transform

use bevy::prelude::*;
use shardscape_core::{CrystalMotion, CrystalState, HoverReport, HoverTuning, TriggerOutcome};

use crate::exit::ExitGroup;
use crate::types::*;

/// A hoverable, clickable crystal
#[derive(Component, Debug)]
pub struct Crystal {
    pub state: CrystalState,
    pub motion: CrystalMotion,
    /// Group entity owning the exit sequence this crystal reports clicks to
    pub sequencer: Entity,
}

impl Crystal {
    pub fn new(state: CrystalState, tuning: &HoverTuning, sequencer: Entity) -> Self {
        let motion = CrystalMotion::at_rest(&state, tuning);
        Self {
            state,
            motion,
            sequencer,
        }
    }
}

pub struct CrystalPlugin;

impl Plugin for CrystalPlugin {
    fn build(&self, app: &mut App) {
        configure_scene_sets(app);
        app.init_resource::<HoveredLabel>()
            .init_resource::<DesiredCursor>()
            .add_message::<CrystalPointer>()
            .add_systems(Update, apply_crystal_pointer.in_set(SceneSystems::Interaction))
            .add_systems(Update, ease_crystals.in_set(SceneSystems::Animation));
    }
}

fn report_hover(report: HoverReport, label: &mut ResMut<HoveredLabel>, cursor: &mut ResMut<DesiredCursor>) {
    if label.set_if_neq(HoveredLabel(report.label)) {
        tracing::debug!(label = ?label.0, "Hovered label changed");
    }
    cursor.set_if_neq(DesiredCursor(report.cursor));
}

/// Apply pointer messages to crystal state and forward clicks to the owning sequencer
fn apply_crystal_pointer(
    mut events: MessageReader<CrystalPointer>,
    mut crystals: Query<&mut Crystal>,
    mut groups: Query<&mut ExitGroup>,
    mut label: ResMut<HoveredLabel>,
    mut cursor: ResMut<DesiredCursor>,
) {
    for event in events.read() {
        let Ok(mut crystal) = crystals.get_mut(event.crystal) else {
            continue;
        };

        match event.action {
            PointerAction::Enter => {
                let report = crystal.state.pointer_enter();
                report_hover(report, &mut label, &mut cursor);
            }
            PointerAction::Leave => {
                let report = crystal.state.pointer_leave();
                report_hover(report, &mut label, &mut cursor);
            }
            PointerAction::Click => {
                let click = crystal.state.click();
                let Ok(mut group) = groups.get_mut(crystal.sequencer) else {
                    tracing::warn!(crystal = ?event.crystal, "Crystal has no exit sequencer");
                    continue;
                };
                if group.trigger(&click) == TriggerOutcome::Ignored {
                    tracing::debug!(crystal = ?event.crystal, "Exit sequence already running, click ignored");
                }
            }
        }
    }
}

/// Ease every crystal toward its hovered or resting pose
fn ease_crystals(
    time: Res<Time>,
    settings: Res<SceneSettings>,
    mut crystals: Query<(&mut Crystal, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (crystal, mut transform) in &mut crystals {
        let crystal = crystal.into_inner();
        crystal
            .motion
            .step(&crystal.state, &settings.hover, settings.smoothing, dt);
        transform.translation = crystal.motion.translation;
        transform.scale = Vec3::splat(crystal.motion.scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::ExitPlugin;
    use bevy::time::TimeUpdateStrategy;
    use shardscape_core::{CursorAffordance, Route};
    use std::time::Duration;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
            .init_resource::<SceneSettings>()
            .add_plugins((CrystalPlugin, ExitPlugin));
        app
    }

    fn spawn_crystal(app: &mut App, x: f32, route: Option<&str>) -> (Entity, Entity) {
        let settings = app.world().resource::<SceneSettings>().clone();
        let origin = settings.scene.group_origin;
        let group = app
            .world_mut()
            .spawn((
                ExitGroup::new(settings.exit, origin),
                Transform::from_translation(origin),
            ))
            .id();

        let state = CrystalState::new(Vec3::new(x, 2.25, 0.0), Vec3::ZERO, route.map(Route::new));
        let crystal = app
            .world_mut()
            .spawn((
                Crystal::new(state, &settings.hover, group),
                Transform::from_xyz(x, 2.25, 0.0),
            ))
            .id();
        (group, crystal)
    }

    fn point(app: &mut App, crystal: Entity, action: PointerAction) {
        app.world_mut().write_message(CrystalPointer { crystal, action });
    }

    #[test]
    fn test_hover_reports_label_and_cursor() {
        let mut app = test_app();
        let (_, crystal) = spawn_crystal(&mut app, 1.0, Some("/store"));

        point(&mut app, crystal, PointerAction::Enter);
        app.update();

        assert_eq!(app.world().resource::<HoveredLabel>().0.as_deref(), Some("STORE"));
        assert_eq!(
            app.world().resource::<DesiredCursor>().0,
            CursorAffordance::Pointer
        );

        point(&mut app, crystal, PointerAction::Leave);
        app.update();

        assert_eq!(app.world().resource::<HoveredLabel>().0, None);
        assert_eq!(
            app.world().resource::<DesiredCursor>().0,
            CursorAffordance::Default
        );
    }

    #[test]
    fn test_hovered_crystal_lifts_and_grows() {
        let mut app = test_app();
        let (_, crystal) = spawn_crystal(&mut app, -1.0, Some("/works"));

        point(&mut app, crystal, PointerAction::Enter);
        for _ in 0..120 {
            app.update();
        }

        let transform = app.world().get::<Transform>(crystal).unwrap();
        assert!(transform.scale.x > 1.19 && transform.scale.x <= 1.2);
        assert!(transform.translation.y > 2.44 && transform.translation.y <= 2.45);
        assert_eq!(transform.translation.x, -1.0);
    }

    #[test]
    fn test_click_starts_owning_sequence() {
        let mut app = test_app();
        let (group, crystal) = spawn_crystal(&mut app, 0.0, None);

        point(&mut app, crystal, PointerAction::Click);
        app.update();

        let exit = app.world().get::<ExitGroup>(group).unwrap();
        assert!(exit.sequence.is_animating());
        assert_eq!(exit.sequence.pending_route(), None);
        assert!(!exit.navigation_pending());
    }

    #[test]
    fn test_pointer_on_despawned_crystal_is_ignored() {
        let mut app = test_app();
        let (_, crystal) = spawn_crystal(&mut app, 0.0, Some("/about"));
        app.world_mut().despawn(crystal);

        point(&mut app, crystal, PointerAction::Enter);
        app.update();

        assert_eq!(app.world().resource::<HoveredLabel>().0, None);
    }
}
