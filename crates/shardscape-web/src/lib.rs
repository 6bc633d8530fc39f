//! Shardscape Web - WebGPU-powered hero scene frontend
//!
//! This crate hosts the hero scene in the browser: routing through the
//! History API, the page chrome, and the wasm entry point.

mod app;
mod router;
mod ui;

pub use app::{embedded_config, run, EMBEDDED_CONFIG};
pub use router::Router;

use wasm_bindgen::prelude::*;

/// Entry point for WASM module
#[wasm_bindgen(start)]
pub fn main() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging with filtering to reduce wgpu noise
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::WARN)
            .build()
    );

    // Run the Bevy app
    app::run(app::embedded_config());
}
