//! Badge: the compact alarm summary shown by default

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use alarmpanel_app::PanelModel;

use crate::theme::{icons::IconSet, palette, styles};

pub struct Badge<'a> {
    model: &'a PanelModel,
    icons: IconSet,
}

impl<'a> Badge<'a> {
    pub fn new(model: &'a PanelModel, icons: IconSet) -> Self {
        Self { model, icons }
    }
}

impl Widget for Badge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = &self.model.display;
        let block = styles::glass_block(false)
            .border_style(styles::state_border(display))
            .title(" Alarm ")
            .style(Style::default().bg(palette::CARD_BG));

        let mut lines = vec![
            Line::from(vec![
                Span::styled(self.icons.state(display.icon), styles::state_label(display)),
                Span::raw("  "),
                Span::styled(display.label, styles::state_label(display)),
            ]),
            Line::styled(display.description, styles::text_secondary()),
        ];
        if let Some(changed_by) = &self.model.changed_by {
            lines.push(Line::styled(changed_by.as_str(), styles::text_muted()));
        }
        lines.push(Line::from(vec![
            Span::styled(self.model.tap_hint, styles::text_muted()),
            Span::styled(" [Enter]", styles::keybinding()),
        ]));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_model, TestTerminal};
    use alarmpanel_app::IconMode;

    #[test]
    fn test_badge_shows_label_description_and_hint() {
        let model = test_model("armed_home", Some("Alice"));
        let mut term = TestTerminal::with_size(40, 7);

        term.render_widget(Badge::new(&model, IconSet::new(IconMode::Unicode)), term.area());

        assert!(term.buffer_contains("Armed Home"));
        assert!(term.buffer_contains("Perimeter Secured"));
        assert!(term.buffer_contains("by Alice"));
        assert!(term.buffer_contains("Tap to disarm"));
    }

    #[test]
    fn test_badge_disarmed_hint() {
        let model = test_model("disarmed", None);
        let mut term = TestTerminal::with_size(40, 7);

        term.render_widget(Badge::new(&model, IconSet::new(IconMode::Unicode)), term.area());

        assert!(term.buffer_contains("System Ready"));
        assert!(term.buffer_contains("Tap to arm"));
        assert!(!term.buffer_contains("by "));
    }
}
