//! Application state (Model in TEA pattern)

use chrono::{DateTime, Utc};

use alarmpanel_core::prelude::*;
use alarmpanel_core::{AlarmState, StateSnapshot};
use alarmpanel_hass::ConnectionState;

use crate::config::{CardConfig, PanelConfig, UiSettings};
use crate::display::{project, EntryPointRow, PanelModel};
use crate::view::{ViewMode, ViewState};

/// Lifecycle of the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub card: CardConfig,

    pub ui: UiSettings,

    /// Latest entity states from Home Assistant
    pub snapshot: StateSnapshot,

    /// Overlay flag and PIN buffer
    pub view: ViewState,

    /// Cursor into the visible entry-point rows
    pub selected_entry: usize,

    pub connection: ConnectionState,

    /// Last successful projection; kept while the alarm entity is missing
    pub model: Option<PanelModel>,

    pub phase: AppPhase,
}

impl AppState {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            card: config.card,
            ui: config.ui,
            snapshot: StateSnapshot::new(),
            view: ViewState::new(),
            selected_entry: 0,
            connection: ConnectionState::Connecting,
            model: None,
            phase: AppPhase::Running,
        }
    }

    /// Re-project the display model as of now.
    pub fn refresh(&mut self) {
        self.refresh_at(Utc::now());
    }

    /// Re-project the display model; a missing alarm entity keeps the old one.
    pub fn refresh_at(&mut self, now: DateTime<Utc>) {
        match project(&self.card, &self.snapshot, &self.view, now) {
            Some(model) => {
                let rows = model.entry_points.len();
                self.selected_entry = self.selected_entry.min(rows.saturating_sub(1));
                self.model = Some(model);
            }
            None => {
                trace!("Alarm entity {} not in snapshot, keeping view", self.card.entity);
            }
        }
    }

    /// Alarm state of the displayed model.
    pub fn alarm_state(&self) -> Option<AlarmState> {
        self.model.as_ref().map(|m| m.alarm)
    }

    pub fn mode(&self) -> ViewMode {
        self.model.as_ref().map_or(ViewMode::Badge, |m| m.mode)
    }

    pub fn selected_row(&self) -> Option<&EntryPointRow> {
        self.model
            .as_ref()
            .and_then(|m| m.entry_point(self.selected_entry))
    }

    pub fn entry_count(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.entry_points.len())
    }

    pub fn request_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alarmpanel_hass::test_utils::{fixed_now, test_alarm_entity};

    fn state() -> AppState {
        AppState::new(PanelConfig {
            card: CardConfig::for_entity("alarm_control_panel.home"),
            ..PanelConfig::default()
        })
    }

    #[test]
    fn test_initial_state() {
        let state = state();
        assert!(state.model.is_none());
        assert_eq!(state.mode(), ViewMode::Badge);
        assert_eq!(state.connection, ConnectionState::Connecting);
        assert!(!state.should_quit());
    }

    #[test]
    fn test_refresh_keeps_model_when_alarm_missing() {
        let mut state = state();
        state
            .snapshot
            .upsert(test_alarm_entity("alarm_control_panel.home", "armed_home", None));
        state.refresh_at(fixed_now());
        assert_eq!(state.alarm_state(), Some(AlarmState::ArmedHome));

        state.snapshot.remove("alarm_control_panel.home");
        state.refresh_at(fixed_now());
        assert_eq!(state.alarm_state(), Some(AlarmState::ArmedHome));
    }

    #[test]
    fn test_request_quit() {
        let mut state = state();
        state.request_quit();
        assert!(state.should_quit());
    }
}
