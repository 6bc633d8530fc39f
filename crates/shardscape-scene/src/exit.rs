//! Exit sequence driver for the crystal group

use bevy::prelude::*;
use shardscape_core::{CrystalClick, ExitSequence, ExitTuning, GroupPose, TriggerOutcome};

use crate::types::*;

/// The crystal group, the exit sequence it owns and the navigation delay.
/// Despawning the group drops any navigation still pending.
#[derive(Component, Debug)]
pub struct ExitGroup {
    pub sequence: ExitSequence,
    pub pose: GroupPose,
    delay: Timer,
    /// Armed by a routed click; the delay starts counting on the next frame
    navigation: Option<Timer>,
}

impl ExitGroup {
    pub fn new(tuning: ExitTuning, origin: Vec3) -> Self {
        Self {
            sequence: ExitSequence::new(tuning),
            pose: GroupPose::at(origin),
            delay: Timer::new(tuning.navigation_delay(), TimerMode::Once),
            navigation: None,
        }
    }

    /// Offer a click to the sequence and arm the navigation delay when it
    /// starts with a route
    pub fn trigger(&mut self, click: &CrystalClick) -> TriggerOutcome {
        let outcome = self.sequence.trigger(click, self.pose.translation);
        if matches!(outcome, TriggerOutcome::Started(_)) && self.sequence.pending_route().is_some() {
            self.navigation = Some(self.delay.clone());
        }
        outcome
    }

    pub fn navigation_pending(&self) -> bool {
        self.navigation.is_some()
    }
}

pub struct ExitPlugin;

impl Plugin for ExitPlugin {
    fn build(&self, app: &mut App) {
        configure_scene_sets(app);
        app.add_message::<NavigationRequest>()
            // Ticks before clicks are applied so a frame's delta never counts
            // time from before the click
            .add_systems(Update, tick_exit_navigation.before(SceneSystems::Interaction))
            .add_systems(Update, animate_exit_groups.in_set(SceneSystems::Animation));
    }
}

fn animate_exit_groups(
    time: Res<Time>,
    settings: Res<SceneSettings>,
    mut groups: Query<(&mut ExitGroup, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (group, mut transform) in &mut groups {
        if !group.sequence.is_animating() {
            continue;
        }

        let group = group.into_inner();
        group.sequence.advance(&mut group.pose, settings.smoothing, dt);
        transform.translation = group.pose.translation;
        transform.scale = Vec3::splat(group.pose.scale);
        transform.rotation = Quat::from_rotation_z(group.pose.tilt);
    }
}

fn tick_exit_navigation(
    time: Res<Time>,
    mut groups: Query<&mut ExitGroup>,
    mut requests: MessageWriter<NavigationRequest>,
) {
    for mut group in &mut groups {
        let Some(timer) = group.navigation.as_mut() else {
            continue;
        };
        if !timer.tick(time.delta()).just_finished() {
            continue;
        }

        group.navigation = None;
        if let Some(route) = group.sequence.complete() {
            requests.write(NavigationRequest { route });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crystals::{Crystal, CrystalPlugin};
    use bevy::time::TimeUpdateStrategy;
    use shardscape_core::{CrystalState, Route};
    use std::time::Duration;

    #[derive(Resource, Default)]
    struct NavigationLog(Vec<Route>);

    fn record_navigation(
        mut requests: MessageReader<NavigationRequest>,
        mut log: ResMut<NavigationLog>,
    ) {
        log.0.extend(requests.read().map(|r| r.route.clone()));
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .init_resource::<SceneSettings>()
            .init_resource::<NavigationLog>()
            .add_plugins((CrystalPlugin, ExitPlugin))
            .add_systems(PostUpdate, record_navigation);
        app
    }

    /// Spawns the group plus one crystal per `(x, route)` pair
    fn spawn_scene(app: &mut App, crystals: &[(f32, Option<&str>)]) -> (Entity, Vec<Entity>) {
        let settings = app.world().resource::<SceneSettings>().clone();
        let origin = settings.scene.group_origin;
        let group = app
            .world_mut()
            .spawn((
                ExitGroup::new(settings.exit, origin),
                Transform::from_translation(origin),
            ))
            .id();

        let crystals = crystals
            .iter()
            .map(|(x, route)| {
                let position = Vec3::new(*x, -1.0, 0.0);
                let state = CrystalState::new(position, Vec3::ZERO, route.map(Route::new));
                app.world_mut()
                    .spawn((
                        Crystal::new(state, &settings.hover, group),
                        Transform::from_translation(position),
                        ChildOf(group),
                    ))
                    .id()
            })
            .collect();
        (group, crystals)
    }

    fn click(app: &mut App, crystal: Entity) {
        app.world_mut().write_message(CrystalPointer {
            crystal,
            action: PointerAction::Click,
        });
    }

    fn run_frames(app: &mut App, frames: usize) {
        for _ in 0..frames {
            app.update();
        }
    }

    fn navigations(app: &App) -> Vec<Route> {
        app.world().resource::<NavigationLog>().0.clone()
    }

    #[test]
    fn test_navigation_never_fires_early() {
        let mut app = test_app();
        let (group, crystals) = spawn_scene(&mut app, &[(0.0, Some("/about"))]);

        // Let time start flowing so the click frame carries a full delta
        run_frames(&mut app, 1);
        click(&mut app, crystals[0]);
        run_frames(&mut app, 25);
        assert!(navigations(&app).is_empty());
        assert!(app.world().get::<ExitGroup>(group).unwrap().navigation_pending());

        run_frames(&mut app, 1);
        assert_eq!(navigations(&app), vec![Route::new("/about")]);
        assert!(!app.world().get::<ExitGroup>(group).unwrap().navigation_pending());
    }

    #[test]
    fn test_routed_click_navigates_once_after_delay() {
        let mut app = test_app();
        let (_, crystals) = spawn_scene(&mut app, &[(0.0, Some("/about"))]);

        click(&mut app, crystals[0]);
        run_frames(&mut app, 20);
        assert!(navigations(&app).is_empty());

        run_frames(&mut app, 20);
        assert_eq!(navigations(&app), vec![Route::new("/about")]);
    }

    #[test]
    fn test_double_click_yields_one_navigation() {
        let mut app = test_app();
        let (group, crystals) =
            spawn_scene(&mut app, &[(-2.25, Some("/works")), (2.25, Some("/store"))]);

        click(&mut app, crystals[0]);
        click(&mut app, crystals[1]);
        run_frames(&mut app, 2);
        click(&mut app, crystals[1]);
        run_frames(&mut app, 40);

        assert_eq!(navigations(&app), vec![Route::new("/works")]);
        let transform = app.world().get::<Transform>(group).unwrap();
        assert!(transform.translation.x > 10.0);
    }

    #[test]
    fn test_decorative_click_flies_without_navigating() {
        let mut app = test_app();
        let (group, crystals) = spawn_scene(&mut app, &[(2.25, None)]);

        click(&mut app, crystals[0]);
        run_frames(&mut app, 60);

        assert!(navigations(&app).is_empty());
        let transform = app.world().get::<Transform>(group).unwrap();
        assert!(transform.translation.x < -15.0);
        assert!(transform.scale.x < 0.9);
        assert!(transform.rotation.to_euler(EulerRot::XYZ).2 > 0.0);
    }

    #[test]
    fn test_despawning_group_cancels_navigation() {
        let mut app = test_app();
        let (group, crystals) = spawn_scene(&mut app, &[(0.0, Some("/about"))]);

        click(&mut app, crystals[0]);
        run_frames(&mut app, 2);
        app.world_mut().entity_mut(group).despawn();
        run_frames(&mut app, 40);

        assert!(navigations(&app).is_empty());
    }

    #[test]
    fn test_idle_group_stays_put() {
        let mut app = test_app();
        let (group, _) = spawn_scene(&mut app, &[(0.0, Some("/about"))]);
        run_frames(&mut app, 10);

        let transform = app.world().get::<Transform>(group).unwrap();
        assert_eq!(transform.translation, Vec3::new(0.0, -2.5, 0.0));
        assert_eq!(transform.scale, Vec3::ONE);
    }
}
