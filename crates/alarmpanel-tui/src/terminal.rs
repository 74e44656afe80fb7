//! Alternate-screen lifecycle

use alarmpanel_core::prelude::*;

/// Take over the terminal. A panic restores it before the report prints.
pub fn enter() -> ratatui::DefaultTerminal {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!("Panic: {}", info);
        ratatui::restore();
        previous(info);
    }));
    ratatui::init()
}

/// Hand the terminal back to the shell.
pub fn leave() {
    ratatui::restore();
}
