//! Configuration types for Alarm Panel
//!
//! Defines:
//! - `PanelConfig` - The whole config file
//! - `ConnectionSettings` - Where and how to reach Home Assistant
//! - `CardConfig` - Alarm entity, command domain and entry points
//! - `UiSettings` - Icon mode and refresh rate

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

use alarmpanel_core::prelude::*;
use alarmpanel_core::{EntryPointConfig, DEFAULT_ALARM_DOMAIN};

/// Root of `config.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub connection: ConnectionSettings,

    #[serde(default)]
    pub card: CardConfig,

    #[serde(default)]
    pub ui: UiSettings,
}

impl PanelConfig {
    /// Reject configurations the panel cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.card.entity.trim().is_empty() {
            return Err(Error::config_invalid("Please define an entity"));
        }
        if self.card.service_domain.trim().is_empty() {
            return Err(Error::config_invalid("card.service_domain must not be empty"));
        }
        if self.ui.tick_ms == 0 {
            return Err(Error::config_invalid("ui.tick_ms must be greater than zero"));
        }
        for entry in &self.card.entry_points {
            if entry.entity_id.trim().is_empty() {
                return Err(Error::config_invalid(format!(
                    "Entry point {:?} has no entity_id",
                    entry.name
                )));
            }
        }
        Ok(())
    }

    /// WebSocket endpoint derived from `connection.url`.
    pub fn websocket_url(&self) -> Result<Url> {
        alarmpanel_hass::websocket_url(&self.connection.url)
    }
}

/// `[connection]`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionSettings {
    /// Home Assistant base URL (http, https, ws or wss)
    #[serde(default = "default_url")]
    pub url: String,

    /// Long-lived access token; `ALARMPANEL_TOKEN` takes precedence
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            token: None,
        }
    }
}

fn default_url() -> String {
    "http://homeassistant.local:8123".to_string()
}

/// `[card]`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CardConfig {
    /// Alarm entity id (required)
    #[serde(default)]
    pub entity: String,

    /// Domain for arm/disarm service calls
    #[serde(default = "default_service_domain")]
    pub service_domain: String,

    /// PIN sent with `arm_home` / `arm_away`
    #[serde(default = "default_arm_code")]
    pub arm_code: String,

    #[serde(default)]
    pub entry_points: Vec<EntryPointConfig>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            entity: String::new(),
            service_domain: default_service_domain(),
            arm_code: default_arm_code(),
            entry_points: Vec::new(),
        }
    }
}

impl CardConfig {
    /// Minimal card for an alarm entity with defaults everywhere else.
    pub fn for_entity(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            ..Self::default()
        }
    }

    /// Every entity id the panel reads: the alarm, each entry point and its
    /// battery sensor.
    pub fn watched_entities(&self) -> HashSet<String> {
        std::iter::once(self.entity.clone())
            .chain(self.entry_points.iter().flat_map(|entry| {
                std::iter::once(entry.entity_id.clone()).chain(entry.battery_entity.clone())
            }))
            .collect()
    }
}

fn default_service_domain() -> String {
    DEFAULT_ALARM_DOMAIN.to_string()
}

fn default_arm_code() -> String {
    "123456".to_string()
}

/// Icon rendering mode for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconMode {
    /// Plain Unicode characters that work in all terminals
    #[default]
    Unicode,
    /// Nerd Font glyphs; requires a Nerd Font in the terminal
    NerdFonts,
}

impl std::fmt::Display for IconMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconMode::Unicode => write!(f, "unicode"),
            IconMode::NerdFonts => write!(f, "nerd_fonts"),
        }
    }
}

/// `[ui]`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default)]
    pub icons: IconMode,

    /// Redraw interval when idle; also how often age text refreshes
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            icons: IconMode::default(),
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_tick_ms() -> u64 {
    1000
}
