//! Configuration file parsing for Alarm Panel
//!
//! A single TOML file (default `~/.config/alarmpanel/config.toml`) with
//! `[connection]`, `[card]` and `[ui]` sections.

pub mod settings;
pub mod types;

pub use settings::{
    default_config_path, load_config, resolve_token, write_default_config, CONFIG_FILENAME,
    TOKEN_ENV_VAR,
};
pub use types::*;
