//! Crystal hover state and eased transform

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::easing::{lerp, Smoothing};
use crate::route::Route;

/// Pointer cursor the host should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorAffordance {
    #[default]
    Default,
    Pointer,
}

/// Hover tuning for every crystal in a scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverTuning {
    /// Uniform scale while hovered
    pub scale: f32,
    /// Uniform scale at rest
    pub rest_scale: f32,
    /// Vertical lift while hovered
    pub lift: f32,
    /// Fraction of the remaining gap closed per frame
    pub rate: f32,
}

impl Default for HoverTuning {
    fn default() -> Self {
        Self {
            scale: 1.2,
            rest_scale: 1.0,
            lift: 0.2,
            rate: 0.1,
        }
    }
}

/// What a hover change reports to the page chrome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverReport {
    pub label: Option<String>,
    pub cursor: CursorAffordance,
}

/// A click forwarded to the exit sequencer
#[derive(Debug, Clone, PartialEq)]
pub struct CrystalClick {
    pub route: Option<Route>,
    /// Rest position in group space
    pub position: Vec3,
}

/// Per-crystal interaction state
#[derive(Debug, Clone, PartialEq)]
pub struct CrystalState {
    position: Vec3,
    rotation: Vec3,
    route: Option<Route>,
    hovered: bool,
}

impl CrystalState {
    pub fn new(position: Vec3, rotation: Vec3, route: Option<Route>) -> Self {
        Self {
            position,
            rotation,
            route: route.filter(|r| !r.is_empty()),
            hovered: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler XYZ orientation
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn label(&self) -> Option<String> {
        self.route.as_ref().and_then(Route::label)
    }

    pub fn pointer_enter(&mut self) -> HoverReport {
        self.hovered = true;
        HoverReport {
            label: self.label(),
            cursor: CursorAffordance::Pointer,
        }
    }

    pub fn pointer_leave(&mut self) -> HoverReport {
        self.hovered = false;
        HoverReport {
            label: None,
            cursor: CursorAffordance::Default,
        }
    }

    pub fn click(&self) -> CrystalClick {
        CrystalClick {
            route: self.route.clone(),
            position: self.position,
        }
    }
}

/// Eased visual transform derived from a crystal's hover state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrystalMotion {
    pub scale: f32,
    pub translation: Vec3,
}

impl CrystalMotion {
    pub fn at_rest(state: &CrystalState, tuning: &HoverTuning) -> Self {
        Self {
            scale: tuning.rest_scale,
            translation: state.position(),
        }
    }

    /// Advance one frame toward the hovered or resting pose
    pub fn step(
        &mut self,
        state: &CrystalState,
        tuning: &HoverTuning,
        smoothing: Smoothing,
        dt: f32,
    ) {
        let factor = smoothing.factor(tuning.rate, dt);
        let rest = state.position();
        let (target_scale, target_y) = if state.is_hovered() {
            (tuning.scale, rest.y + tuning.lift)
        } else {
            (tuning.rest_scale, rest.y)
        };

        self.scale = lerp(self.scale, target_scale, factor);
        self.translation = Vec3::new(rest.x, lerp(self.translation.y, target_y, factor), rest.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn crystal(route: Option<&str>) -> CrystalState {
        CrystalState::new(Vec3::new(-1.0, 2.25, 0.0), Vec3::new(0.0, 0.0, 0.6), route.map(Route::new))
    }

    #[test]
    fn test_label_follows_route() {
        assert_eq!(crystal(Some("/about")).label().as_deref(), Some("ABOUT"));
        assert_eq!(crystal(Some("/")).label().as_deref(), Some("HOME"));
        assert_eq!(crystal(None).label(), None);
    }

    #[test]
    fn test_empty_route_is_decorative() {
        let state = crystal(Some(""));
        assert!(state.route().is_none());
        assert_eq!(state.click().route, None);
    }

    #[test]
    fn test_enter_and_leave_reports() {
        let mut state = crystal(Some("/works"));

        let enter = state.pointer_enter();
        assert!(state.is_hovered());
        assert_eq!(enter.label.as_deref(), Some("WORKS"));
        assert_eq!(enter.cursor, CursorAffordance::Pointer);

        let leave = state.pointer_leave();
        assert!(!state.is_hovered());
        assert_eq!(leave.label, None);
        assert_eq!(leave.cursor, CursorAffordance::Default);
    }

    #[test]
    fn test_decorative_crystal_hovers_without_label() {
        let mut state = crystal(None);
        let enter = state.pointer_enter();
        assert!(state.is_hovered());
        assert_eq!(enter.label, None);
        assert_eq!(enter.cursor, CursorAffordance::Pointer);
    }

    #[test]
    fn test_click_carries_rest_position() {
        let state = crystal(Some("/works"));
        let click = state.click();
        assert_eq!(click.route, Some(Route::new("/works")));
        assert_eq!(click.position, Vec3::new(-1.0, 2.25, 0.0));
    }

    #[test]
    fn test_hover_scale_converges_without_overshoot() {
        let tuning = HoverTuning::default();
        let mut state = crystal(Some("/about"));
        let mut motion = CrystalMotion::at_rest(&state, &tuning);

        state.pointer_enter();
        let mut previous = motion.scale;
        for _ in 0..200 {
            motion.step(&state, &tuning, Smoothing::PerFrame, FRAME);
            assert!(motion.scale >= previous);
            assert!(motion.scale <= tuning.scale);
            previous = motion.scale;
        }
        assert!((motion.scale - tuning.scale).abs() < 1e-4);

        state.pointer_leave();
        for _ in 0..200 {
            motion.step(&state, &tuning, Smoothing::PerFrame, FRAME);
            assert!(motion.scale <= previous);
            assert!(motion.scale >= tuning.rest_scale);
            previous = motion.scale;
        }
        assert!((motion.scale - tuning.rest_scale).abs() < 1e-4);
    }

    #[test]
    fn test_first_hover_frame_closes_ten_percent() {
        let tuning = HoverTuning::default();
        let mut state = crystal(None);
        let mut motion = CrystalMotion::at_rest(&state, &tuning);

        state.pointer_enter();
        motion.step(&state, &tuning, Smoothing::PerFrame, FRAME);

        assert!((motion.scale - 1.02).abs() < 1e-6);
        assert!((motion.translation.y - 2.27).abs() < 1e-5);
    }

    #[test]
    fn test_hover_lift_keeps_x_and_z_pinned() {
        let tuning = HoverTuning::default();
        let mut state = crystal(Some("/works"));
        let mut motion = CrystalMotion::at_rest(&state, &tuning);

        state.pointer_enter();
        for _ in 0..300 {
            motion.step(&state, &tuning, Smoothing::PerFrame, FRAME);
        }

        assert_eq!(motion.translation.x, -1.0);
        assert_eq!(motion.translation.z, 0.0);
        assert!((motion.translation.y - 2.45).abs() < 1e-4);
    }
}
