//! Centralized theme for the panel.
//!
//! - `palette` - Raw color constants, including one per alarm state color
//! - `styles` - Semantic style builder functions
//! - `icons` - Glyphs per icon slot, Nerd Font or plain Unicode

pub mod icons;
pub mod palette;
pub mod styles;
