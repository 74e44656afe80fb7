//! Abstract input key event, independent of terminal library.
//!
//! Key bindings live in the app crate, so the state machine can be driven by
//! tests without a terminal. The TUI converts crossterm events at its edge.

/// Abstract input key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key (digits, letters, space)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+c, ...)
    CharCtrl(char),

    Up,
    Down,

    Enter,
    Esc,
    Backspace,
    Delete,
}

impl InputKey {
    /// The decimal digit this key represents, if any.
    pub fn digit(&self) -> Option<u8> {
        match self {
            InputKey::Char(c) => c.to_digit(10).and_then(|d| u8::try_from(d).ok()),
            _ => None,
        }
    }
}
