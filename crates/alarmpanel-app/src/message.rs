//! Message types for the application (TEA pattern)

use alarmpanel_core::{EntityState, StateSnapshot};
use alarmpanel_hass::{ConnectionState, HassEvent};

use crate::input_key::InputKey;
use crate::view::UserAction;

/// All possible messages in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// A user intent for the panel state machine
    Action(UserAction),

    // ─────────────────────────────────────────────────────────
    // State ingestion
    // ─────────────────────────────────────────────────────────
    /// Full state load; replaces the snapshot
    SnapshotReceived(StateSnapshot),

    /// One entity changed; `None` means it was removed
    EntityChanged {
        entity_id: String,
        new_state: Option<EntityState>,
    },

    /// Home Assistant connection status changed
    ConnectionChanged(ConnectionState),

    // ─────────────────────────────────────────────────────────
    // Entry-point list
    // ─────────────────────────────────────────────────────────
    SelectNextEntry,
    SelectPreviousEntry,
    /// Toggle the entry point under the cursor
    ToggleSelectedEntry,

    /// Tick event for periodic updates (age text)
    Tick,

    /// Quit immediately (q, Ctrl+C, signal handler)
    Quit,
}

impl From<HassEvent> for Message {
    fn from(event: HassEvent) -> Self {
        match event {
            HassEvent::StatesLoaded(states) => {
                Message::SnapshotReceived(states.into_iter().collect())
            }
            HassEvent::StateChanged {
                entity_id,
                new_state,
            } => Message::EntityChanged {
                entity_id,
                new_state,
            },
            HassEvent::Connection(state) => Message::ConnectionChanged(state),
        }
    }
}
