//! Monitored entry points (doors, windows, other sensors)
//!
//! Entry points are declared in configuration; their live classification is
//! derived from the provider's state on every projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityState;

/// Kind of entry point; selects the icon family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPointKind {
    Door,
    Window,
    #[default]
    #[serde(other)]
    Other,
}

/// Configuration-declared entry point
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EntryPointConfig {
    pub entity_id: String,

    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: EntryPointKind,

    /// Separate sensor whose state is the battery percentage
    #[serde(default)]
    pub battery_entity: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityClassification {
    Secure,
    Insecure,
}

impl SecurityClassification {
    /// `Secure` iff the raw state is `locked` or `closed`.
    pub fn from_state(state: &str) -> Self {
        match state {
            "locked" | "closed" => SecurityClassification::Secure,
            _ => SecurityClassification::Insecure,
        }
    }

    pub fn is_secure(&self) -> bool {
        matches!(self, SecurityClassification::Secure)
    }
}

/// Glyph slot for an entry point row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPointIcon {
    DoorLocked,
    DoorUnlocked,
    WindowClosed,
    WindowOpen,
}

impl EntryPointIcon {
    pub fn select(kind: EntryPointKind, classification: SecurityClassification) -> Self {
        match (kind, classification.is_secure()) {
            (EntryPointKind::Door, true) => EntryPointIcon::DoorLocked,
            (EntryPointKind::Door, false) => EntryPointIcon::DoorUnlocked,
            (_, true) => EntryPointIcon::WindowClosed,
            (_, false) => EntryPointIcon::WindowOpen,
        }
    }
}

/// Derived display status of one entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointStatus {
    pub classification: SecurityClassification,
    pub icon: EntryPointIcon,
    pub age_text: String,
    /// Raw state, first letter upper-cased (`locked` → `Locked`)
    pub status_label: String,
    /// Battery sensor state verbatim; `None` when not configured, unknown to
    /// the provider, or empty
    pub battery: Option<String>,
}

/// Classify an entry point against its live state.
///
/// `battery` is the battery entity's state, if one is configured and known.
pub fn classify(
    config: &EntryPointConfig,
    entity: &EntityState,
    battery: Option<&EntityState>,
    now: DateTime<Utc>,
) -> EntryPointStatus {
    let classification = SecurityClassification::from_state(&entity.state);

    EntryPointStatus {
        classification,
        icon: EntryPointIcon::select(config.kind, classification),
        age_text: age_text(entity.last_changed, now),
        status_label: capitalize(&entity.state),
        battery: battery
            .map(|b| b.state.clone())
            .filter(|state| !state.is_empty()),
    }
}

/// Relative age of a change: `Just now`, `{m}m ago`, `{h}h ago`, `{d}d ago`.
///
/// Each tier floors; timestamps in the future read as `Just now`.
pub fn age_text(last_changed: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - last_changed).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{days}d ago")
    }
}

fn capitalize(state: &str) -> String {
    let mut chars = state.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
