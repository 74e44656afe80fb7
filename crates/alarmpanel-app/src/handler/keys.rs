//! Key event handlers for the panel's view modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::pin_buffer::Digit;
use crate::state::AppState;
use crate::view::{UserAction, ViewMode};

/// Convert key events to messages based on the displayed view mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match state.mode() {
        ViewMode::Badge => handle_key_badge(key),
        ViewMode::ArmOptions => handle_key_arm_options(key),
        ViewMode::Keypad => handle_key_keypad(key),
    }
}

fn handle_key_badge(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::Action(UserAction::OpenInterface)),
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectPreviousEntry),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectNextEntry),
        InputKey::Char(' ' | 't') => Some(Message::ToggleSelectedEntry),
        InputKey::Char('q') => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_arm_options(key: InputKey) -> Option<Message> {
    let action = match key {
        InputKey::Char('h') => UserAction::ArmHome,
        InputKey::Char('a') => UserAction::ArmAway,
        InputKey::Esc => UserAction::Close,
        _ => return None,
    };
    Some(Message::Action(action))
}

fn handle_key_keypad(key: InputKey) -> Option<Message> {
    if let Some(digit) = key.digit().and_then(Digit::new) {
        return Some(Message::Action(UserAction::AppendDigit(digit)));
    }

    let action = match key {
        InputKey::Backspace | InputKey::Delete | InputKey::Char('c') => UserAction::Clear,
        InputKey::Enter => UserAction::Submit,
        InputKey::Esc => UserAction::Close,
        _ => return None,
    };
    Some(Message::Action(action))
}
