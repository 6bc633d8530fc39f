//! One-shot exit sequence: fly the crystal group away, then navigate
//!
//! The first click on any crystal picks an exit direction from the clicked
//! crystal's horizontal position and eases the whole group toward a point far
//! outside the view. The clicked route is held until the host's fixed delay
//! runs out. The sequence runs at most once per scene.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::crystal::CrystalClick;
use crate::easing::{lerp, Smoothing};
use crate::route::Route;

/// Exit sequence tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitTuning {
    /// How far the group travels
    pub distance: f32,
    /// Half-width of the x band that exits downward
    pub dead_zone: f32,
    pub position_rate: f32,
    pub scale_target: f32,
    pub scale_rate: f32,
    /// Tilt per unit of horizontal travel
    pub tilt_gain: f32,
    /// Tilt used for downward exits
    pub downward_tilt: f32,
    pub tilt_rate: f32,
    pub navigation_delay_ms: u64,
}

impl Default for ExitTuning {
    fn default() -> Self {
        Self {
            distance: 20.0,
            dead_zone: 0.1,
            position_rate: 0.03,
            scale_target: 0.5,
            scale_rate: 0.02,
            tilt_gain: 0.2,
            downward_tilt: 0.1,
            tilt_rate: 0.02,
            navigation_delay_ms: 2500,
        }
    }
}

impl ExitTuning {
    pub fn navigation_delay(&self) -> Duration {
        Duration::from_millis(self.navigation_delay_ms)
    }
}

/// Which way the group leaves the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDirection {
    Rightward,
    Leftward,
    Downward,
}

impl ExitDirection {
    /// Crystals left of the dead zone push the group right and vice versa.
    /// The dead zone boundary itself exits downward.
    pub fn classify(x: f32, dead_zone: f32) -> Self {
        if x < -dead_zone {
            ExitDirection::Rightward
        } else if x > dead_zone {
            ExitDirection::Leftward
        } else {
            ExitDirection::Downward
        }
    }

    pub fn offset(&self, distance: f32) -> Vec3 {
        match self {
            ExitDirection::Rightward => Vec3::new(distance, 0.0, 0.0),
            ExitDirection::Leftward => Vec3::new(-distance, 0.0, 0.0),
            ExitDirection::Downward => Vec3::new(0.0, -distance, 0.0),
        }
    }
}

/// Transform of the crystal group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupPose {
    pub translation: Vec3,
    pub scale: f32,
    /// Rotation about z in radians
    pub tilt: f32,
}

impl GroupPose {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            scale: 1.0,
            tilt: 0.0,
        }
    }
}

/// Result of offering a click to the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Started(ExitDirection),
    /// A sequence is already running
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ExitPhase {
    Idle,
    Animating {
        offset: Vec3,
        target: Vec3,
    },
}

/// Exit sequencer shared by every crystal of a scene.
///
/// Holds the route of the click that started the sequence until the host's
/// delay elapses and calls [`ExitSequence::complete`].
#[derive(Debug)]
pub struct ExitSequence {
    tuning: ExitTuning,
    phase: ExitPhase,
    pending: Option<Route>,
}

impl ExitSequence {
    pub fn new(tuning: ExitTuning) -> Self {
        Self {
            tuning,
            phase: ExitPhase::Idle,
            pending: None,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, ExitPhase::Animating { .. })
    }

    pub fn pending_route(&self) -> Option<&Route> {
        self.pending.as_ref()
    }

    /// Start the sequence from `click` with the group currently at `group_translation`
    pub fn trigger(&mut self, click: &CrystalClick, group_translation: Vec3) -> TriggerOutcome {
        if self.is_animating() {
            return TriggerOutcome::Ignored;
        }

        let direction = ExitDirection::classify(click.position.x, self.tuning.dead_zone);
        let offset = direction.offset(self.tuning.distance);
        self.phase = ExitPhase::Animating {
            offset,
            target: group_translation + offset,
        };
        self.pending = click.route.clone();

        tracing::info!(
            ?direction,
            route = ?self.pending.as_ref().map(Route::as_str),
            "Exit sequence started"
        );
        TriggerOutcome::Started(direction)
    }

    /// Ease `pose` one frame toward the exit pose. No-op while idle.
    pub fn advance(&self, pose: &mut GroupPose, smoothing: Smoothing, dt: f32) {
        let ExitPhase::Animating { offset, target, .. } = self.phase else {
            return;
        };
        let t = &self.tuning;

        let tilt_target = if offset.x != 0.0 {
            -offset.x * t.tilt_gain
        } else {
            t.downward_tilt
        };

        pose.translation = pose
            .translation
            .lerp(target, smoothing.factor(t.position_rate, dt));
        pose.scale = lerp(pose.scale, t.scale_target, smoothing.factor(t.scale_rate, dt));
        pose.tilt = lerp(pose.tilt, tilt_target, smoothing.factor(t.tilt_rate, dt));
    }

    /// Hand out the pending route once the navigation delay has elapsed.
    /// Returns it at most once; the animation keeps running.
    pub fn complete(&mut self) -> Option<Route> {
        let route = self.pending.take();
        if let Some(route) = &route {
            tracing::info!(route = %route, "Exit sequence complete, navigating");
        }
        route
    }

    /// Drop any pending navigation. The animation state is left as is.
    pub fn cancel(&mut self) -> Option<Route> {
        let route = self.pending.take();
        if let Some(route) = &route {
            tracing::debug!(route = %route, "Pending navigation cancelled");
        }
        route
    }
}

impl Drop for ExitSequence {
    fn drop(&mut self) {
        self.cancel();
    }
}
