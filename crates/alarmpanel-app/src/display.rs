//! Display model projection
//!
//! [`project`] turns the latest snapshot plus the view state into a
//! [`PanelModel`] the renderer draws verbatim. It returns `None` when the
//! alarm entity is missing; callers keep their previous model in that case.

use chrono::{DateTime, Utc};

use alarmpanel_core::{classify, AlarmState, DisplayInfo, EntryPointStatus, StateSnapshot};

use crate::config::CardConfig;
use crate::pin_buffer::{MAX_PIN_LEN, MIN_SUBMIT_LEN};
use crate::view::{ViewMode, ViewState};

pub const TAP_TO_ARM: &str = "Tap to arm";
pub const TAP_TO_DISARM: &str = "Tap to disarm";

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelModel {
    pub alarm: AlarmState,
    pub display: DisplayInfo,
    /// `by {name}` line under the badge
    pub changed_by: Option<String>,
    pub tap_hint: &'static str,
    pub mode: ViewMode,
    /// Configured entry points whose entity is known, in config order
    pub entry_points: Vec<EntryPointRow>,
    pub keypad: KeypadModel,
}

impl PanelModel {
    pub fn entry_point(&self, index: usize) -> Option<&EntryPointRow> {
        self.entry_points.get(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointRow {
    pub entity_id: String,
    pub name: String,
    pub status: EntryPointStatus,
}

impl EntryPointRow {
    /// `87%` style battery text, if a level is known.
    pub fn battery_text(&self) -> Option<String> {
        self.status.battery.as_ref().map(|level| format!("{level}%"))
    }
}

/// PIN entry indicator state. Digits are never exposed, only the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeypadModel {
    pub filled: usize,
    pub submit_enabled: bool,
}

impl KeypadModel {
    /// Dots shown when nothing is entered yet.
    pub const PLACEHOLDER_DOTS: usize = MIN_SUBMIT_LEN;

    pub fn counter_text(&self) -> String {
        format!("{}/{} digits", self.filled, MAX_PIN_LEN)
    }
}

/// Project the snapshot and view state into a display model.
pub fn project(
    card: &CardConfig,
    snapshot: &StateSnapshot,
    view: &ViewState,
    now: DateTime<Utc>,
) -> Option<PanelModel> {
    let alarm_entity = snapshot.get(&card.entity)?;
    let alarm = AlarmState::from_code(&alarm_entity.state);

    let entry_points = card
        .entry_points
        .iter()
        .filter_map(|config| {
            let entity = snapshot.get(&config.entity_id)?;
            let battery = config
                .battery_entity
                .as_deref()
                .and_then(|id| snapshot.get(id));
            Some(EntryPointRow {
                entity_id: config.entity_id.clone(),
                name: config.name.clone(),
                status: classify(config, entity, battery, now),
            })
        })
        .collect();

    Some(PanelModel {
        alarm,
        display: alarm.display_info(),
        changed_by: alarm_entity
            .string_attribute("changed_by")
            .map(|name| format!("by {name}")),
        tap_hint: if alarm == AlarmState::Disarmed {
            TAP_TO_ARM
        } else {
            TAP_TO_DISARM
        },
        mode: view.mode(alarm),
        entry_points,
        keypad: KeypadModel {
            filled: view.pin().len(),
            submit_enabled: view.pin().is_submit_eligible(),
        },
    })
}
