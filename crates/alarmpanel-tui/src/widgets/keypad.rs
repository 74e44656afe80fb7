//! PIN keypad overlay

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use alarmpanel_app::KeypadModel;
use alarmpanel_core::DisplayInfo;

use super::overlay_header;
use crate::theme::{icons::IconSet, styles};

pub const WIDTH: u16 = 46;
pub const HEIGHT: u16 = 15;

const KEY_ROWS: [[&str; 3]; 3] = [["1", "2", "3"], ["4", "5", "6"], ["7", "8", "9"]];

pub struct Keypad<'a> {
    display: &'a DisplayInfo,
    keypad: KeypadModel,
    icons: IconSet,
}

impl<'a> Keypad<'a> {
    pub fn new(display: &'a DisplayInfo, keypad: KeypadModel, icons: IconSet) -> Self {
        Self {
            display,
            keypad,
            icons,
        }
    }

    fn pin_line(&self) -> Line<'static> {
        let dot = self.icons.dot();
        if self.keypad.filled == 0 {
            let placeholder = vec![dot; KeypadModel::PLACEHOLDER_DOTS].join(" ");
            Line::styled(placeholder, styles::text_muted().add_modifier(Modifier::DIM))
        } else {
            Line::styled(vec![dot; self.keypad.filled].join(" "), styles::accent())
        }
    }

    fn key_row(keys: [&'static str; 3]) -> Line<'static> {
        let spans: Vec<Span> = keys
            .iter()
            .flat_map(|k| [Span::styled(format!(" {k} "), styles::text_primary()), Span::raw(" ")])
            .collect();
        Line::from(spans)
    }

    fn bottom_row(&self) -> Line<'static> {
        let submit_style = if self.keypad.submit_enabled {
            styles::submit_enabled()
        } else {
            styles::submit_disabled()
        };
        Line::from(vec![
            Span::styled(" C ", styles::keybinding()),
            Span::raw(" "),
            Span::styled(" 0 ", styles::text_primary()),
            Span::raw(" "),
            Span::styled(format!(" {} ", self.icons.check()), submit_style),
            Span::raw(" "),
        ])
    }
}

impl Widget for Keypad<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = overlay_header(self.display, self.icons);
        lines.push(Line::raw(""));
        lines.push(self.pin_line().alignment(Alignment::Center));
        lines.push(
            Line::styled(self.keypad.counter_text(), styles::text_muted())
                .alignment(Alignment::Center),
        );
        lines.push(Line::raw(""));
        for keys in KEY_ROWS {
            lines.push(Self::key_row(keys).alignment(Alignment::Center));
        }
        lines.push(self.bottom_row().alignment(Alignment::Center));
        lines.push(Line::raw(""));
        lines.push(
            Line::styled("[Enter] disarm  [Bksp] clear  [Esc] close", styles::text_muted())
                .alignment(Alignment::Center),
        );

        Paragraph::new(lines)
            .block(styles::modal_block(self.display).title(" Enter PIN "))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use alarmpanel_app::IconMode;
    use alarmpanel_core::map_state;

    fn render(filled: usize, submit_enabled: bool) -> TestTerminal {
        let display = map_state("triggered");
        let keypad = KeypadModel {
            filled,
            submit_enabled,
        };
        let mut term = TestTerminal::with_size(WIDTH, HEIGHT);
        term.render_widget(
            Keypad::new(&display, keypad, IconSet::new(IconMode::Unicode)),
            term.area(),
        );
        term
    }

    #[test]
    fn test_keypad_header_and_keys() {
        let term = render(0, false);
        assert!(term.buffer_contains("TRIGGERED!"));
        assert!(term.buffer_contains("Alarm Active"));
        assert!(term.buffer_contains(" 1 "));
        assert!(term.buffer_contains(" 0 "));
        assert!(term.buffer_contains("✓"));
    }

    #[test]
    fn test_empty_buffer_shows_placeholder_and_counter() {
        let term = render(0, false);
        assert!(term.buffer_contains("● ● ● ● ● ●"));
        assert!(term.buffer_contains("0/8 digits"));
    }

    #[test]
    fn test_filled_dots_match_count() {
        let term = render(7, true);
        assert!(term.buffer_contains("● ● ● ● ● ● ●"));
        assert!(!term.buffer_contains("● ● ● ● ● ● ● ●"));
        assert!(term.buffer_contains("7/8 digits"));
    }

    #[test]
    fn test_submit_key_style_tracks_eligibility() {
        let find_check = |term: &TestTerminal| {
            let area = term.area();
            (0..area.height)
                .flat_map(|y| (0..area.width).map(move |x| (x, y)))
                .find(|&(x, y)| term.cell_at(x, y) == Some("✓"))
                .map(|(x, y)| term.buffer()[(x, y)].fg)
        };

        let disabled = render(5, false);
        let enabled = render(6, true);
        assert_ne!(find_check(&disabled), find_check(&enabled));
        assert_eq!(
            find_check(&enabled),
            Some(crate::theme::palette::STATUS_GREEN)
        );
    }
}
