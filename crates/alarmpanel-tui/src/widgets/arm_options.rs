//! Arm-mode selector overlay

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use alarmpanel_core::{DisplayInfo, StateIcon};

use super::overlay_header;
use crate::theme::{icons::IconSet, styles};

pub const WIDTH: u16 = 44;
pub const HEIGHT: u16 = 10;

pub struct ArmOptions<'a> {
    display: &'a DisplayInfo,
    icons: IconSet,
}

impl<'a> ArmOptions<'a> {
    pub fn new(display: &'a DisplayInfo, icons: IconSet) -> Self {
        Self { display, icons }
    }

    fn option(
        &self,
        key: &'static str,
        icon: StateIcon,
        title: &'static str,
        detail: &'static str,
    ) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("[{key}] "), styles::keybinding()),
            Span::styled(self.icons.state(icon), styles::accent()),
            Span::raw(" "),
            Span::styled(title, styles::text_primary()),
            Span::styled(format!("  {detail}"), styles::text_muted()),
        ])
    }
}

impl Widget for ArmOptions<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = overlay_header(self.display, self.icons);
        lines.push(Line::raw(""));
        lines.push(self.option("h", StateIcon::Home, "Arm Home", "Perimeter only"));
        lines.push(self.option("a", StateIcon::Lock, "Arm Away", "All zones + exit delay"));
        lines.push(Line::raw(""));
        lines.push(Line::styled("[Esc] close", styles::text_muted()).alignment(Alignment::Center));

        Paragraph::new(lines)
            .block(styles::modal_block(self.display).title(" Arm System "))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use alarmpanel_app::IconMode;
    use alarmpanel_core::map_state;

    #[test]
    fn test_arm_options_lists_both_modes() {
        let display = map_state("disarmed");
        let mut term = TestTerminal::with_size(WIDTH, HEIGHT);

        term.render_widget(
            ArmOptions::new(&display, IconSet::new(IconMode::Unicode)),
            term.area(),
        );

        assert!(term.buffer_contains("Disarmed"));
        assert!(term.buffer_contains("Arm Home"));
        assert!(term.buffer_contains("Perimeter only"));
        assert!(term.buffer_contains("Arm Away"));
        assert!(term.buffer_contains("All zones + exit delay"));
        assert!(term.buffer_contains("[Esc] close"));
    }
}
