//! Icon set for the TUI.
//!
//! `IconSet` resolves icon slots at runtime based on `IconMode`.
//! - `IconMode::Unicode` - plain characters that work in all terminals
//! - `IconMode::NerdFonts` - Nerd Font glyphs (requires a Nerd Font)

use alarmpanel_app::IconMode;
use alarmpanel_core::{EntryPointIcon, StateIcon};

/// Runtime icon resolver.
#[derive(Debug, Clone, Copy)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Badge icon for an alarm state.
    pub fn state(&self, icon: StateIcon) -> &'static str {
        match (self.mode, icon) {
            (IconMode::NerdFonts, StateIcon::Shield) => "\u{f132}", // nf-fa-shield
            (IconMode::NerdFonts, StateIcon::Home) => "\u{f015}",   // nf-fa-home
            (IconMode::NerdFonts, StateIcon::Lock) => "\u{f023}",   // nf-fa-lock
            (IconMode::NerdFonts, StateIcon::Warning) => "\u{f071}", // nf-fa-warning
            (IconMode::Unicode, StateIcon::Shield) => "\u{26e8}",   // ⛨
            (IconMode::Unicode, StateIcon::Home) => "\u{2302}",     // ⌂
            (IconMode::Unicode, StateIcon::Lock) => "\u{22a0}",     // ⊠
            (IconMode::Unicode, StateIcon::Warning) => "\u{26a0}",  // ⚠
        }
    }

    pub fn entry_point(&self, icon: EntryPointIcon) -> &'static str {
        match (self.mode, icon) {
            (IconMode::NerdFonts, EntryPointIcon::DoorLocked) => "\u{f023}", // nf-fa-lock
            (IconMode::NerdFonts, EntryPointIcon::DoorUnlocked) => "\u{f09c}", // nf-fa-unlock
            (IconMode::NerdFonts, EntryPointIcon::WindowClosed) => "\u{f2d0}", // nf-fa-window_maximize
            (IconMode::NerdFonts, EntryPointIcon::WindowOpen) => "\u{f2d2}", // nf-fa-window_restore
            (IconMode::Unicode, EntryPointIcon::DoorLocked) => "\u{25a3}",   // ▣
            (IconMode::Unicode, EntryPointIcon::DoorUnlocked) => "\u{25a1}", // □
            (IconMode::Unicode, EntryPointIcon::WindowClosed) => "\u{25a6}", // ▦
            (IconMode::Unicode, EntryPointIcon::WindowOpen) => "\u{25a2}",   // ▢
        }
    }

    pub fn battery(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f241}", // nf-fa-battery_three_quarters
            IconMode::Unicode => "\u{25ae}",   // ▮
        }
    }

    /// PIN dot; same in both modes so the count reads the same everywhere.
    pub fn dot(&self) -> &'static str {
        "\u{25cf}" // ●
    }

    pub fn check(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f00c}", // nf-fa-check
            IconMode::Unicode => "\u{2713}",   // ✓
        }
    }

    pub fn chevron_right(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f054}", // nf-fa-chevron_right
            IconMode::Unicode => "\u{203a}",   // ›
        }
    }
}
