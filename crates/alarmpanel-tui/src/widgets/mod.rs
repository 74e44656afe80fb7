//! Custom widget components

mod arm_options;
mod badge;
mod entry_points;
mod keypad;
pub mod modal_overlay;
mod status_bar;

use ratatui::text::{Line, Span};

use alarmpanel_core::DisplayInfo;

use crate::theme::{icons::IconSet, styles};

pub use arm_options::{ArmOptions, HEIGHT as ARM_OPTIONS_HEIGHT, WIDTH as ARM_OPTIONS_WIDTH};
pub use badge::Badge;
pub use entry_points::EntryPointList;
pub use keypad::{Keypad, HEIGHT as KEYPAD_HEIGHT, WIDTH as KEYPAD_WIDTH};
pub use status_bar::StatusBar;

/// Icon, label and description in the state color, centered.
fn overlay_header(display: &DisplayInfo, icons: IconSet) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(icons.state(display.icon), styles::state_label(display)),
            Span::raw(" "),
            Span::styled(display.label, styles::state_label(display)),
        ])
        .centered(),
        Line::styled(display.description, styles::text_secondary()).centered(),
    ]
}
