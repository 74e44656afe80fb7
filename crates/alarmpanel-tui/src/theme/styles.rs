//! Semantic style builders.

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use alarmpanel_core::{DisplayInfo, SecurityClassification};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

/// Key hint, e.g. the `[h]` before an option
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

// --- Alarm state styles ---

/// Bold label in the state color
pub fn state_label(display: &DisplayInfo) -> Style {
    Style::default()
        .fg(palette::state_color(display.color))
        .add_modifier(Modifier::BOLD)
}

pub fn state_border(display: &DisplayInfo) -> Style {
    Style::default().fg(palette::state_color(display.color))
}

pub fn classification(classification: SecurityClassification) -> Style {
    if classification.is_secure() {
        Style::default().fg(palette::STATUS_GREEN)
    } else {
        Style::default().fg(palette::STATUS_RED)
    }
}

// --- Selection styles ---

/// "Black on Cyan" - focused row
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Keypad ---
pub fn submit_enabled() -> Style {
    Style::default()
        .fg(palette::STATUS_GREEN)
        .add_modifier(Modifier::BOLD)
}

pub fn submit_disabled() -> Style {
    text_muted().add_modifier(Modifier::DIM)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

/// Popup block outlined in the alarm state's color
pub fn modal_block(display: &DisplayInfo) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(state_border(display))
        .style(Style::default().bg(palette::POPUP_BG))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alarmpanel_core::map_state;

    #[test]
    fn test_state_label_is_bold_in_state_color() {
        let style = state_label(&map_state("armed_home"));
        assert_eq!(style.fg, Some(palette::STATUS_BLUE));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_classification_colors() {
        assert_eq!(
            classification(SecurityClassification::Secure).fg,
            Some(palette::STATUS_GREEN)
        );
        assert_eq!(
            classification(SecurityClassification::Insecure).fg,
            Some(palette::STATUS_RED)
        );
    }
}
