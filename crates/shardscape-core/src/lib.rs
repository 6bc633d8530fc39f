//! Shardscape Core - crystal interaction and exit sequencing
//!
//! This crate holds the engine-independent logic of the Shardscape hero scene:
//! - Crystal hover state, labels and eased hover transform
//! - The one-shot exit sequence that flies the crystal group away and
//!   navigates after a fixed delay
//! - Routes, pages and the `Navigator` seam to the router
//! - Scene layout, model sources and TOML configuration

pub mod config;
pub mod crystal;
pub mod easing;
pub mod exit;
pub mod layout;
pub mod picking;
pub mod route;

pub use config::{ConfigError, EffectsConfig, PickingConfig, SceneConfig, SceneLayoutConfig};
pub use crystal::{CrystalClick, CrystalMotion, CrystalState, CursorAffordance, HoverReport, HoverTuning};
pub use easing::Smoothing;
pub use exit::{ExitDirection, ExitSequence, ExitTuning, GroupPose, TriggerOutcome};
pub use layout::{CrystalSpec, ModelFormat, ModelSource, RingSpec};
pub use route::{MemoryNavigator, Navigator, Page, Route};
