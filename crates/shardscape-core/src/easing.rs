//! Exponential easing toward a target

use serde::{Deserialize, Serialize};

/// Move `current` toward `target` by `factor` of the remaining distance
pub fn lerp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// How a per-frame easing rate is applied to a frame of length `dt`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Smoothing {
    /// Apply the rate once per frame regardless of frame length.
    /// Visual speed follows the host frame rate.
    #[default]
    PerFrame,
    /// Scale the rate by elapsed time so that it matches `PerFrame`
    /// at `reference_fps` and stays consistent at any other rate.
    TimeScaled { reference_fps: f32 },
}

impl Smoothing {
    /// Effective interpolation factor for a frame lasting `dt` seconds
    pub fn factor(&self, rate: f32, dt: f32) -> f32 {
        match *self {
            Smoothing::PerFrame => rate,
            Smoothing::TimeScaled { reference_fps } => {
                let frames = (dt * reference_fps).max(0.0);
                1.0 - (1.0 - rate).powf(frames)
            }
        }
    }
}
