//! Hero scene lifecycle: lights, and mounting the crystal group on the home page

use bevy::prelude::*;
use shardscape_core::{CursorAffordance, ModelFormat, ModelSource, Page};

use crate::crystals::Crystal;
use crate::exit::ExitGroup;
use crate::types::*;

/// Root of the mounted hero scene
#[derive(Component)]
pub struct HeroRoot;

/// Marker component for the main directional light
#[derive(Component)]
pub struct MainDirectionalLight;

/// Plugin for scene setup
pub struct SceneSetupPlugin;

impl Plugin for SceneSetupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoverTarget>()
            .add_systems(Startup, setup_lights)
            .add_systems(OnEnter(ActivePage(Page::Home)), mount_hero_scene)
            .add_systems(OnExit(ActivePage(Page::Home)), unmount_hero_scene);
    }
}

fn setup_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            color: Color::srgb_u8(0xff, 0xf4, 0xcc),
            illuminance: 2500.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(2.0, 2.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainDirectionalLight,
    ));
}

/// Load a model as a scene. Only glTF binaries have a loader; other formats
/// render nothing.
fn load_model(asset_server: &AssetServer, source: &ModelSource) -> Option<Handle<Scene>> {
    match source.format {
        ModelFormat::Glb => {
            Some(asset_server.load(GltfAssetLabel::Scene(0).from_asset(source.path())))
        }
        format => {
            tracing::warn!(model = %source.path(), ?format, "No loader for model format, skipping");
            None
        }
    }
}

fn euler_rotation(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

fn mount_hero_scene(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<SceneSettings>,
) {
    let origin = settings.scene.group_origin;
    let group = commands
        .spawn((
            Name::new("Crystal group"),
            HeroRoot,
            ExitGroup::new(settings.exit, origin),
            Transform::from_translation(origin),
            Visibility::default(),
        ))
        .id();

    for spec in &settings.crystals {
        let state = spec.state();
        let transform =
            Transform::from_translation(state.position()).with_rotation(euler_rotation(state.rotation()));
        let mut crystal = commands.spawn((
            Name::new(spec.model.name.clone()),
            Crystal::new(state, &settings.hover, group),
            transform,
            Visibility::default(),
            ChildOf(group),
        ));
        if let Some(scene) = load_model(&asset_server, &spec.model) {
            crystal.insert(SceneRoot(scene));
        }
    }

    if let Some(ring) = &settings.scene.ring {
        let mut entity = commands.spawn((
            Name::new(ring.model.name.clone()),
            Transform::from_translation(ring.position).with_scale(Vec3::splat(ring.scale)),
            Visibility::default(),
            ChildOf(group),
        ));
        if let Some(scene) = load_model(&asset_server, &ring.model) {
            entity.insert(SceneRoot(scene));
        }
    }

    tracing::info!(crystals = settings.crystals.len(), "Hero scene mounted");
}

/// Despawn the hero scene. Any pending navigation goes with it.
fn unmount_hero_scene(
    mut commands: Commands,
    roots: Query<Entity, With<HeroRoot>>,
    mut hover: ResMut<HoverTarget>,
    mut label: ResMut<HoveredLabel>,
    mut cursor: ResMut<DesiredCursor>,
) {
    for root in &roots {
        commands.entity(root).despawn();
    }
    hover.0 = None;
    label.set_if_neq(HoveredLabel(None));
    cursor.set_if_neq(DesiredCursor(CursorAffordance::Default));

    tracing::info!("Hero scene unmounted");
}
