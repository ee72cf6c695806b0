//! Alley-Run Viewer
//!
//! Windowed Bevy app for the bowling-alley scene. Pass a JSON scene file
//! as the first argument to override the built-in alley layout.

use anyhow::Context;
use bevy::prelude::*;
use tracing::info;

use alleyrun_core::bevy::AlleyRunPlugin;
use alleyrun_core::scene::AlleyConfig;

fn load_config() -> anyhow::Result<AlleyConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading scene config");
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read scene file {path}"))?;
            Ok(AlleyConfig::from_json(&json)
                .with_context(|| format!("failed to parse scene file {path}"))?)
        }
        None => Ok(AlleyConfig::default_alley()),
    }
}

fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "alley-run".to_string(),
                ..Window::default()
            }),
            ..WindowPlugin::default()
        }))
        .add_plugins(AlleyRunPlugin { config })
        .run();

    Ok(())
}
