//! Message processing
//!
//! Runs a message through [`handler::update`], follows any chained messages
//! and hands emitted service calls to the dispatcher.

use alarmpanel_core::prelude::*;

use crate::dispatch::CommandDispatcher;
use crate::handler::{self, UpdateAction};
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message(
    state: &mut AppState,
    message: Message,
    dispatcher: &dyn CommandDispatcher,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, dispatcher);
        }

        msg = result.message;
    }
}

fn handle_action(action: UpdateAction, dispatcher: &dyn CommandDispatcher) {
    match action {
        UpdateAction::CallService(call) => {
            debug!("Dispatching {}", call);
            dispatcher.dispatch(call);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CardConfig, PanelConfig};
    use crate::dispatch::MockCommandDispatcher;
    use crate::input_key::InputKey;
    use crate::view::ViewMode;
    use alarmpanel_core::{AlarmService, ServiceCall};
    use alarmpanel_hass::test_utils::test_alarm_entity;
    use mockall::predicate::eq;

    const ALARM: &str = "alarm_control_panel.home";

    fn loaded_state(code: &str) -> AppState {
        let mut state = AppState::new(PanelConfig {
            card: CardConfig::for_entity(ALARM),
            ..PanelConfig::default()
        });
        state
            .snapshot
            .upsert(test_alarm_entity(ALARM, code, None));
        state.refresh();
        state
    }

    #[test]
    fn test_key_chain_dispatches_arm_away() {
        let mut state = loaded_state("disarmed");
        let mut dispatcher = MockCommandDispatcher::new();
        dispatcher
            .expect_dispatch()
            .with(eq(ServiceCall::alarm(
                "secure_alarm",
                AlarmService::ArmAway,
                "123456",
            )))
            .times(1)
            .return_const(());

        process_message(&mut state, Message::Key(InputKey::Enter), &dispatcher);
        process_message(&mut state, Message::Key(InputKey::Char('a')), &dispatcher);

        assert_eq!(state.mode(), ViewMode::Badge);
    }

    #[test]
    fn test_no_dispatch_for_view_only_messages() {
        let mut state = loaded_state("armed_home");
        let mut dispatcher = MockCommandDispatcher::new();
        dispatcher.expect_dispatch().never();

        for message in [
            Message::Key(InputKey::Enter),
            Message::Key(InputKey::Char('4')),
            Message::Key(InputKey::Backspace),
            Message::Tick,
            Message::Key(InputKey::Esc),
        ] {
            process_message(&mut state, message, &dispatcher);
        }

        assert_eq!(state.mode(), ViewMode::Badge);
    }
}
