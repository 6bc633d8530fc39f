//! Scene configuration loading and validation

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::crystal::HoverTuning;
use crate::easing::Smoothing;
use crate::exit::ExitTuning;
use crate::layout::{default_crystals, CrystalSpec, RingSpec};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read scene config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse scene config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid scene config: {0}")]
    Invalid(String),
}

/// Full scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub hover: HoverTuning,
    #[serde(default)]
    pub exit: ExitTuning,
    #[serde(default)]
    pub smoothing: Smoothing,
    #[serde(default)]
    pub picking: PickingConfig,
    #[serde(default)]
    pub scene: SceneLayoutConfig,
    #[serde(default)]
    pub effects: EffectsConfig,
    #[serde(default = "default_crystals", rename = "crystal")]
    pub crystals: Vec<CrystalSpec>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            hover: HoverTuning::default(),
            exit: ExitTuning::default(),
            smoothing: Smoothing::default(),
            picking: PickingConfig::default(),
            scene: SceneLayoutConfig::default(),
            effects: EffectsConfig::default(),
            crystals: default_crystals(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickingConfig {
    /// Distance from a crystal center that still counts as a hit
    #[serde(default = "default_hit_radius")]
    pub hit_radius: f32,
    /// Touch travel in pixels beyond which a touch is a drag, not a tap
    #[serde(default = "default_tap_slop")]
    pub tap_slop: f32,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            hit_radius: default_hit_radius(),
            tap_slop: default_tap_slop(),
        }
    }
}

fn default_hit_radius() -> f32 {
    0.6
}

fn default_tap_slop() -> f32 {
    10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayoutConfig {
    /// Initial position of the crystal group
    #[serde(default = "default_group_origin")]
    pub group_origin: Vec3,
    /// Optional ring inside the group
    #[serde(default = "default_ring")]
    pub ring: Option<RingSpec>,
}

impl Default for SceneLayoutConfig {
    fn default() -> Self {
        Self {
            group_origin: default_group_origin(),
            ring: default_ring(),
        }
    }
}

fn default_group_origin() -> Vec3 {
    Vec3::new(0.0, -2.5, 0.0)
}

fn default_ring() -> Option<RingSpec> {
    Some(RingSpec::default())
}

/// Post-processing on the hero camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub bloom_intensity: f32,
    /// Luminance above which pixels bloom
    pub bloom_threshold: f32,
    /// Fraction of the half-screen left untouched by the vignette
    pub vignette_offset: f32,
    /// Opacity of the vignette at the screen corners
    pub vignette_darkness: f32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            bloom_intensity: 0.5,
            bloom_threshold: 0.8,
            vignette_offset: 0.3,
            vignette_darkness: 0.6,
        }
    }
}

impl SceneConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "Scene config not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            crystals = config.crystals.len(),
            "Scene config loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("hover.rate", self.hover.rate),
            ("exit.position_rate", self.exit.position_rate),
            ("exit.scale_rate", self.exit.scale_rate),
            ("exit.tilt_rate", self.exit.tilt_rate),
        ];
        for (name, rate) in rates {
            if !(rate > 0.0 && rate <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be in (0, 1], got {rate}"
                )));
            }
        }

        let finite = [
            ("hover.scale", self.hover.scale),
            ("hover.rest_scale", self.hover.rest_scale),
            ("hover.lift", self.hover.lift),
            ("exit.dead_zone", self.exit.dead_zone),
            ("exit.scale_target", self.exit.scale_target),
            ("exit.tilt_gain", self.exit.tilt_gain),
            ("exit.downward_tilt", self.exit.downward_tilt),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }

        let positive = [
            ("exit.distance", self.exit.distance),
            ("picking.hit_radius", self.picking.hit_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let effects = &self.effects;
        if !(effects.bloom_intensity.is_finite() && effects.bloom_intensity >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "effects.bloom_intensity must be non-negative, got {}",
                effects.bloom_intensity
            )));
        }
        if !effects.bloom_threshold.is_finite() {
            return Err(ConfigError::Invalid("effects.bloom_threshold must be finite".into()));
        }
        let unit = [
            ("effects.vignette_offset", effects.vignette_offset),
            ("effects.vignette_darkness", effects.vignette_darkness),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }

        if let Smoothing::TimeScaled { reference_fps } = self.smoothing {
            if !(reference_fps.is_finite() && reference_fps > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "smoothing.reference_fps must be positive, got {reference_fps}"
                )));
            }
        }

        if !self.scene.group_origin.is_finite() {
            return Err(ConfigError::Invalid("scene.group_origin must be finite".into()));
        }

        for (index, crystal) in self.crystals.iter().enumerate() {
            if !crystal.position.is_finite() || !crystal.rotation.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "crystal {index} ({}) has a non-finite transform",
                    crystal.model.name
                )));
            }
        }

        Ok(())
    }
}
