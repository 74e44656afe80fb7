//! Alarm Panel - terminal alarm status and control for Home Assistant
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::Parser;

use alarmpanel_app::config::{
    default_config_path, load_config, resolve_token, write_default_config,
};
use alarmpanel_app::AppState;
use alarmpanel_core::prelude::*;
use alarmpanel_hass::HassClient;

/// Alarm Panel - arm, disarm and watch entry points from the terminal
#[derive(Parser, Debug)]
#[command(name = "alarmpanel")]
#[command(about = "Terminal alarm panel for Home Assistant", long_about = None)]
struct Args {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override `connection.url` from the config file
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Write a starter config file and exit
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args
        .config
        .or_else(default_config_path)
        .ok_or_else(|| Error::config("Could not determine a config directory; pass --config"))?;

    if args.init {
        write_default_config(&config_path)?;
        eprintln!("Wrote starter config to {}", config_path.display());
        return Ok(());
    }

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    alarmpanel_core::logging::init()?;

    let mut config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e @ Error::ConfigNotFound { .. }) => {
            eprintln!("{e}");
            eprintln!("Run `alarmpanel --init` to create one.");
            return Err(e);
        }
        Err(e) => return Err(e),
    };
    if let Some(url) = args.url {
        config.connection.url = url;
    }

    let token = resolve_token(&config)?;
    let ws_url = config.websocket_url()?;

    eprintln!("Connecting to {ws_url}...");
    let watched = config.card.watched_entities();
    let client = HassClient::connect(&ws_url, &token, watched)
        .await
        .inspect_err(|e| {
            error!("Initial connection failed: {}", e);
        })?;

    let state = AppState::new(config);
    alarmpanel_tui::run(state, client).await
}
