//! Main render/view function (View in TEA pattern)


use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use alarmpanel_app::{AppState, PanelModel, ViewMode};

use crate::theme::{icons::IconSet, palette, styles};
use crate::widgets::{self, modal_overlay};

/// Height of the badge card including borders
const BADGE_HEIGHT: u16 = 7;

/// Render the complete UI. Pure: reads state, never modifies it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let [badge_area, entries_area, footer_area] = Layout::vertical([
        Constraint::Length(BADGE_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let icons = IconSet::new(state.ui.icons);

    match &state.model {
        Some(model) => {
            frame.render_widget(widgets::Badge::new(model, icons), badge_area);
            frame.render_widget(
                widgets::EntryPointList::new(&model.entry_points, icons)
                    .selected(state.selected_entry)
                    .focused(!model.mode.is_overlay()),
                entries_area,
            );
        }
        None => render_waiting(frame, badge_area, &state.card.entity),
    }

    frame.render_widget(
        widgets::StatusBar::new(&state.connection, state.mode(), icons),
        footer_area,
    );

    if let Some(model) = &state.model {
        render_overlay(frame, model, icons);
    }
}

fn render_waiting(frame: &mut Frame, area: Rect, entity: &str) {
    let text = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(format!("Waiting for {entity}…"), styles::text_secondary()).centered(),
    ])
    .block(styles::glass_block(false).title(" Alarm "));
    frame.render_widget(text, area);
}

fn render_overlay(frame: &mut Frame, model: &PanelModel, icons: IconSet) {
    let (width, height) = match model.mode {
        ViewMode::Badge => return,
        ViewMode::ArmOptions => (widgets::ARM_OPTIONS_WIDTH, widgets::ARM_OPTIONS_HEIGHT),
        ViewMode::Keypad => (widgets::KEYPAD_WIDTH, widgets::KEYPAD_HEIGHT),
    };

    let area = frame.area();
    modal_overlay::dim_background(frame.buffer_mut(), area);
    let modal = modal_overlay::centered_rect(width, height, area);
    modal_overlay::clear_area(frame.buffer_mut(), modal);

    match model.mode {
        ViewMode::ArmOptions => {
            frame.render_widget(widgets::ArmOptions::new(&model.display, icons), modal)
        }
        ViewMode::Keypad => frame.render_widget(
            widgets::Keypad::new(&model.display, model.keypad, icons),
            modal,
        ),
        ViewMode::Badge => {}
    }
}
