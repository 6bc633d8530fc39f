//! Shardscape - native entry point
//!
//! The browser build starts from the wasm `start` hook in the library; this
//! binary opens the same scene in a desktop window.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::{Context, Result};
    use clap::Parser;
    use shardscape_core::SceneConfig;
    use std::path::PathBuf;
    use tracing_subscriber::EnvFilter;

    #[derive(Parser, Debug)]
    #[command(name = "shardscape")]
    #[command(about = "Crystal hero scene with animated route transitions")]
    #[command(version)]
    struct Args {
        /// Path to a scene configuration file; the embedded one is used when omitted
        #[arg(short, long, env = "SHARDSCAPE_CONFIG")]
        config: Option<PathBuf>,
    }

    pub fn main() -> Result<()> {
        let args = Args::parse();

        // RUST_LOG wins; default to info
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();

        tracing::info!("Shardscape v{}", env!("CARGO_PKG_VERSION"));

        let config = match &args.config {
            Some(path) => SceneConfig::load(path)
                .with_context(|| format!("loading scene config from {}", path.display()))?,
            None => shardscape_web::embedded_config(),
        };

        shardscape_web::run(config);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
