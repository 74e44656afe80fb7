//! Main update function - handles state transitions (TEA pattern)

use alarmpanel_core::prelude::*;

use crate::message::Message;
use crate::state::AppState;
use crate::view::{reduce, ActionContext, Reduction, UserAction};

use super::{keys::handle_key, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Action(action) => handle_action(state, action),

        // ─────────────────────────────────────────────────────────
        // State ingestion
        // ─────────────────────────────────────────────────────────
        Message::SnapshotReceived(snapshot) => {
            debug!("Snapshot received: {} entities", snapshot.len());
            state.snapshot = snapshot;
            state.refresh();
            UpdateResult::none()
        }

        Message::EntityChanged {
            entity_id,
            new_state,
        } => {
            match new_state {
                Some(entity) => state.snapshot.upsert(entity),
                None => {
                    state.snapshot.remove(&entity_id);
                }
            }
            state.refresh();
            UpdateResult::none()
        }

        Message::ConnectionChanged(connection) => {
            info!("Home Assistant connection: {:?}", connection);
            state.connection = connection;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Entry-point list
        // ─────────────────────────────────────────────────────────
        Message::SelectNextEntry => {
            let count = state.entry_count();
            if count > 0 {
                state.selected_entry = (state.selected_entry + 1).min(count - 1);
            }
            UpdateResult::none()
        }

        Message::SelectPreviousEntry => {
            state.selected_entry = state.selected_entry.saturating_sub(1);
            UpdateResult::none()
        }

        Message::ToggleSelectedEntry => match state.selected_row() {
            Some(row) => UpdateResult::message(Message::Action(UserAction::ToggleEntry(
                row.entity_id.clone(),
            ))),
            None => UpdateResult::none(),
        },

        Message::Tick => {
            state.refresh();
            UpdateResult::none()
        }
    }
}

/// Run a user action through the view reducer.
fn handle_action(state: &mut AppState, action: UserAction) -> UpdateResult {
    // Until the alarm entity has been seen there is no mode to act in.
    let Some(alarm) = state.alarm_state() else {
        debug!("Ignoring {}: alarm state not loaded yet", action.name());
        return UpdateResult::none();
    };

    let view = std::mem::take(&mut state.view);
    let ctx = ActionContext {
        alarm,
        alarm_domain: &state.card.service_domain,
        arm_code: &state.card.arm_code,
        snapshot: &state.snapshot,
    };
    let Reduction {
        state: view,
        command,
    } = reduce(view, action, &ctx);

    state.view = view;
    state.refresh();

    match command {
        Some(call) => {
            info!("Requesting {}", call);
            UpdateResult::action(UpdateAction::CallService(call))
        }
        None => UpdateResult::none(),
    }
}
