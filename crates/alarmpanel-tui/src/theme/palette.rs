//! Color palette.

use ratatui::style::Color;

use alarmpanel_core::StateColor;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const CARD_BG: Color = Color::Black;
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43);

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;
pub const CONTRAST_FG: Color = Color::Black;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;
pub const STATUS_BLUE: Color = Color::Blue;
pub const STATUS_ORANGE: Color = Color::Rgb(249, 115, 22);

/// Terminal color for an alarm state color class.
pub fn state_color(color: StateColor) -> Color {
    match color {
        StateColor::Green => STATUS_GREEN,
        StateColor::Blue => STATUS_BLUE,
        StateColor::Red => STATUS_RED,
        StateColor::Yellow => STATUS_YELLOW,
        StateColor::Orange => STATUS_ORANGE,
    }
}
