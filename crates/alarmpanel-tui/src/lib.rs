//! alarmpanel-tui - Terminal UI for Alarm Panel
//!
//! Draws the [`alarmpanel_app::PanelModel`] with ratatui and turns crossterm
//! key presses into [`alarmpanel_app::Message`]s. All behavior lives in the
//! app crate; this crate is the terminal edge.

pub mod event;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run;
