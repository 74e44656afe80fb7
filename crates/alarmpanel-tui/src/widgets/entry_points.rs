//! Entry-point list: doors, windows and other sensors

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use alarmpanel_app::EntryPointRow;

use crate::theme::{icons::IconSet, palette, styles};

pub struct EntryPointList<'a> {
    rows: &'a [EntryPointRow],
    selected: Option<usize>,
    focused: bool,
    icons: IconSet,
}

impl<'a> EntryPointList<'a> {
    pub fn new(rows: &'a [EntryPointRow], icons: IconSet) -> Self {
        Self {
            rows,
            selected: None,
            focused: false,
            icons,
        }
    }

    /// Accent border while the list takes input
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Highlight the row under the cursor
    pub fn selected(mut self, index: usize) -> Self {
        self.selected = Some(index);
        self
    }

    fn row_line(&self, index: usize, row: &'a EntryPointRow) -> Line<'a> {
        let status = &row.status;
        let is_selected = self.selected == Some(index);

        let mut spans = vec![
            Span::styled(
                if is_selected {
                    self.icons.chevron_right()
                } else {
                    " "
                },
                styles::accent(),
            ),
            Span::raw(" "),
            Span::styled(
                self.icons.entry_point(status.icon),
                styles::classification(status.classification),
            ),
            Span::raw(" "),
            Span::styled(
                row.name.as_str(),
                if is_selected {
                    styles::focused_selected()
                } else {
                    styles::text_primary()
                },
            ),
            Span::raw("  "),
            Span::styled(
                status.status_label.as_str(),
                styles::classification(status.classification),
            ),
            Span::styled(format!("  {}", status.age_text), styles::text_muted()),
        ];

        if let Some(battery) = row.battery_text() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(self.icons.battery(), styles::text_secondary()));
            spans.push(Span::styled(format!(" {battery}"), styles::text_secondary()));
        }

        Line::from(spans)
    }
}

impl Widget for EntryPointList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused)
            .title(" Entry Points ")
            .style(Style::default().bg(palette::CARD_BG));

        let lines: Vec<Line> = if self.rows.is_empty() {
            vec![Line::styled("No entry points", styles::text_muted())]
        } else {
            self.rows
                .iter()
                .enumerate()
                .map(|(i, row)| self.row_line(i, row))
                .collect()
        };

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
