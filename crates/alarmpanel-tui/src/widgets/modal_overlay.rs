//! Helpers for drawing a popup over the panel.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Clear, Widget};

use crate::theme::palette;

/// A `width` x `height` rect in the middle of `area`, shrunk to fit.
///
/// ```
/// use ratatui::layout::Rect;
/// use alarmpanel_tui::widgets::modal_overlay::centered_rect;
///
/// let screen = Rect::new(0, 0, 80, 24);
/// assert_eq!(centered_rect(44, 10, screen), Rect::new(18, 7, 44, 10));
/// ```
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Mute everything already drawn in `area`.
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    let muted = Style::default()
        .fg(palette::TEXT_MUTED)
        .bg(palette::DEEPEST_BG);
    buf.set_style(area.intersection(buf.area), muted);
}

/// Blank the popup's footprint before it renders.
pub fn clear_area(buf: &mut Buffer, area: Rect) {
    Clear.render(area, buf);
}
