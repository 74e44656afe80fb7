//! Footer: connection status and key hints

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use alarmpanel_app::ViewMode;
use alarmpanel_hass::ConnectionState;

use crate::theme::{icons::IconSet, palette, styles};

pub struct StatusBar<'a> {
    connection: &'a ConnectionState,
    mode: ViewMode,
    icons: IconSet,
}

impl<'a> StatusBar<'a> {
    pub fn new(connection: &'a ConnectionState, mode: ViewMode, icons: IconSet) -> Self {
        Self {
            connection,
            mode,
            icons,
        }
    }

    fn connection_span(&self) -> Vec<Span<'static>> {
        let (text, color) = match self.connection {
            ConnectionState::Connected => ("Connected".to_string(), palette::STATUS_GREEN),
            ConnectionState::Connecting => ("Connecting…".to_string(), palette::STATUS_YELLOW),
            ConnectionState::Reconnecting { attempt } => {
                (format!("Reconnecting (attempt {attempt})"), palette::STATUS_YELLOW)
            }
            ConnectionState::Disconnected => ("Disconnected".to_string(), palette::STATUS_RED),
        };
        vec![
            Span::styled(self.icons.dot(), Style::default().fg(color)),
            Span::raw(" "),
            Span::styled(text, Style::default().fg(color)),
        ]
    }

    fn hints(&self) -> &'static str {
        match self.mode {
            ViewMode::Badge => "[Enter] open  [↑↓] select  [Space] lock/unlock  [q] quit",
            ViewMode::ArmOptions => "[h] home  [a] away  [Esc] close",
            ViewMode::Keypad => "[0-9] digit  [Enter] disarm  [Esc] close",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = self.connection_span();
        spans.push(Span::styled("  │  ", styles::text_muted()));
        spans.push(Span::styled(self.hints(), styles::text_muted()));

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(palette::DEEPEST_BG))
            .render(area, buf);
    }
}
