//! Test utilities for TUI rendering verification
//!
//! Widgets and full frames are rendered into ratatui's `TestBackend`
//! and asserted on as text.

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};

use alarmpanel_app::config::CardConfig;
use alarmpanel_app::{project, PanelModel, ViewState};
use alarmpanel_core::{EntryPointConfig, EntryPointKind, StateSnapshot};
use alarmpanel_hass::test_utils::{fixed_now, test_alarm_entity, test_entity};

pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

pub const TEST_ALARM: &str = "alarm_control_panel.home";

/// Wrapper around a `TestBackend` terminal.
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// 80x24
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. with [`crate::render::view`].
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        line_content(self.buffer(), line).contains(text)
    }

    pub fn cell_at(&self, x: u16, y: u16) -> Option<&str> {
        let buffer = self.buffer();
        (x < buffer.area.width && y < buffer.area.height).then(|| buffer[(x, y)].symbol())
    }

    /// All rows joined by newlines (for assertion messages)
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        result.push_str(&line_content(buffer, y));
        result.push('\n');
    }
    result
}

fn line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line < buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, line)].symbol());
        }
    }
    result
}

/// Card with a locked front door (battery sensor) and an open kitchen window.
pub fn test_card() -> CardConfig {
    let mut card = CardConfig::for_entity(TEST_ALARM);
    card.entry_points = vec![
        EntryPointConfig {
            entity_id: "lock.front_door".to_string(),
            name: "Front Door".to_string(),
            kind: EntryPointKind::Door,
            battery_entity: Some("sensor.front_door_battery".to_string()),
        },
        EntryPointConfig {
            entity_id: "binary_sensor.kitchen_window".to_string(),
            name: "Kitchen".to_string(),
            kind: EntryPointKind::Window,
            battery_entity: None,
        },
    ];
    card
}

/// Snapshot matching [`test_card`] with the alarm in `code`.
pub fn test_snapshot(code: &str, changed_by: Option<&str>) -> StateSnapshot {
    [
        test_alarm_entity(TEST_ALARM, code, changed_by),
        test_entity("lock.front_door", "locked", 5),
        test_entity("sensor.front_door_battery", "87", 30),
        test_entity("binary_sensor.kitchen_window", "open", 90),
    ]
    .into_iter()
    .collect()
}

/// Badge-mode model for [`test_card`] at the fixed test clock.
pub fn test_model(code: &str, changed_by: Option<&str>) -> PanelModel {
    project(
        &test_card(),
        &test_snapshot(code, changed_by),
        &ViewState::new(),
        fixed_now(),
    )
    .expect("alarm entity is in the snapshot")
}
