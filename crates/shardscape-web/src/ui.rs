//! Page chrome using bevy_egui: vignette, hover label, menu and page title

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use shardscape_core::{CursorAffordance, EffectsConfig, Page};
use shardscape_scene::{ActivePage, DesiredCursor, HoveredLabel, NavigationRequest, SceneSettings};

/// Vertices on each vignette ellipse
const VIGNETTE_SEGMENTS: u32 = 48;

/// Menu entries, left to right
const MENU_PAGES: [Page; 4] = [Page::Home, Page::Works, Page::About, Page::Store];

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MenuState>()
            .add_systems(Update, apply_cursor.run_if(resource_changed::<DesiredCursor>))
            // Main UI system runs in EguiPrimaryContextPass for proper input handling (bevy_egui 0.38+)
            .add_systems(EguiPrimaryContextPass, ui_system);
    }
}

/// Whether the navigation menu is unfolded
#[derive(Debug, Clone, Resource, Default)]
pub struct MenuState {
    pub open: bool,
}

/// Reflect the scene's desired cursor on the primary window
fn apply_cursor(
    mut commands: Commands,
    cursor: Res<DesiredCursor>,
    windows: Query<Entity, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let icon = match cursor.0 {
        CursorAffordance::Pointer => SystemCursorIcon::Pointer,
        CursorAffordance::Default => SystemCursorIcon::Default,
    };
    commands.entity(window).insert(CursorIcon::from(icon));
}

/// Darken the screen edges: clear inside `1 - offset` of the half-screen
/// ellipse, fading to `darkness` at the corners
fn paint_vignette(ctx: &egui::Context, effects: &EffectsConfig) {
    if effects.vignette_darkness <= 0.0 {
        return;
    }

    let rect = ctx.screen_rect();
    let center = rect.center();
    let half = rect.size() / 2.0;
    let edge = egui::Color32::from_black_alpha((effects.vignette_darkness * 255.0) as u8);

    let mut mesh = egui::Mesh::default();
    for i in 0..VIGNETTE_SEGMENTS {
        let angle = i as f32 / VIGNETTE_SEGMENTS as f32 * std::f32::consts::TAU;
        let reach = egui::vec2(angle.cos() * half.x, angle.sin() * half.y);
        mesh.colored_vertex(center + reach * (1.0 - effects.vignette_offset), egui::Color32::TRANSPARENT);
        // sqrt(2) puts the outer ellipse through the corners
        mesh.colored_vertex(center + reach * std::f32::consts::SQRT_2, edge);
    }
    for i in 0..VIGNETTE_SEGMENTS {
        let inner = 2 * i;
        let next = 2 * ((i + 1) % VIGNETTE_SEGMENTS);
        mesh.add_triangle(inner, inner + 1, next + 1);
        mesh.add_triangle(inner, next + 1, next);
    }

    ctx.layer_painter(egui::LayerId::background()).add(mesh);
}

fn ui_system(
    mut contexts: EguiContexts,
    settings: Res<SceneSettings>,
    label: Res<HoveredLabel>,
    active: Res<State<ActivePage>>,
    mut menu: ResMut<MenuState>,
    mut requests: MessageWriter<NavigationRequest>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    paint_vignette(ctx, &settings.effects);

    if let Some(text) = &label.0 {
        egui::Area::new(egui::Id::new("hover_label"))
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(text)
                        .size(64.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
            });
    }

    let page = active.get().0;
    if page != Page::Home {
        egui::Area::new(egui::Id::new("page_title"))
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(32.0, 32.0))
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(page.title())
                        .size(40.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
            });
    }

    egui::Area::new(egui::Id::new("menu"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-32.0, 32.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if menu.open {
                    for target in MENU_PAGES {
                        let entry = egui::RichText::new(target.title())
                            .size(24.0)
                            .color(egui::Color32::WHITE);
                        if ui.add(egui::Button::new(entry).frame(false)).clicked() {
                            requests.write(NavigationRequest {
                                route: target.route(),
                            });
                            menu.open = false;
                        }
                    }
                }

                let icon = if menu.open { "✕" } else { "☰" };
                if ui.button(egui::RichText::new(icon).size(32.0)).clicked() {
                    menu.open = !menu.open;
                }
            });
        });
}
