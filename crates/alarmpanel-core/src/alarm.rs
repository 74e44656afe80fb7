//! Alarm state codes and their display attributes
//!
//! [`map_state`] is total: any code, recognized or not, yields a
//! [`DisplayInfo`]. Unrecognized codes render as `disarmed` so the panel always
//! has something to show.

use std::fmt;

/// Alarm state code reported by the alarm entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlarmState {
    Disarmed,
    ArmedHome,
    ArmedAway,
    /// Exit delay running after an arm request
    Arming,
    /// Entry delay running; disarm before it expires
    Pending,
    Triggered,
    /// Any code outside the set above
    Unknown,
}

impl AlarmState {
    /// All recognized states, in display order.
    pub const RECOGNIZED: [AlarmState; 6] = [
        AlarmState::Disarmed,
        AlarmState::ArmedHome,
        AlarmState::ArmedAway,
        AlarmState::Arming,
        AlarmState::Pending,
        AlarmState::Triggered,
    ];

    /// Parse a raw state code. Never fails; unknown codes become [`AlarmState::Unknown`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "disarmed" => AlarmState::Disarmed,
            "armed_home" => AlarmState::ArmedHome,
            "armed_away" => AlarmState::ArmedAway,
            "arming" => AlarmState::Arming,
            "pending" => AlarmState::Pending,
            "triggered" => AlarmState::Triggered,
            _ => AlarmState::Unknown,
        }
    }

    /// Wire code, `None` for [`AlarmState::Unknown`].
    pub fn code(&self) -> Option<&'static str> {
        match self {
            AlarmState::Disarmed => Some("disarmed"),
            AlarmState::ArmedHome => Some("armed_home"),
            AlarmState::ArmedAway => Some("armed_away"),
            AlarmState::Arming => Some("arming"),
            AlarmState::Pending => Some("pending"),
            AlarmState::Triggered => Some("triggered"),
            AlarmState::Unknown => None,
        }
    }

    /// Whether opening the interface offers arm modes rather than the disarm keypad.
    ///
    /// Only `disarmed` and `arming` qualify. Entry delay, triggered and any
    /// unrecognized code all get the keypad.
    pub fn offers_arm_options(&self) -> bool {
        matches!(self, AlarmState::Disarmed | AlarmState::Arming)
    }

    pub fn display_info(&self) -> DisplayInfo {
        display_info(*self)
    }
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code().unwrap_or("unknown"))
    }
}

/// Color class of a state; the renderer maps it onto its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateColor {
    Green,
    Blue,
    Red,
    Yellow,
    Orange,
}

/// Glyph slot for the badge icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateIcon {
    Shield,
    Home,
    Lock,
    Warning,
}

/// Derived, immutable display attributes of an alarm state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayInfo {
    pub color: StateColor,
    pub icon: StateIcon,
    pub label: &'static str,
    pub description: &'static str,
}

const DISARMED: DisplayInfo = DisplayInfo {
    color: StateColor::Green,
    icon: StateIcon::Shield,
    label: "Disarmed",
    description: "System Ready",
};

/// Display attributes for a parsed state.
pub fn display_info(state: AlarmState) -> DisplayInfo {
    match state {
        AlarmState::Disarmed | AlarmState::Unknown => DISARMED,
        AlarmState::ArmedHome => DisplayInfo {
            color: StateColor::Blue,
            icon: StateIcon::Home,
            label: "Armed Home",
            description: "Perimeter Secured",
        },
        AlarmState::ArmedAway => DisplayInfo {
            color: StateColor::Red,
            icon: StateIcon::Lock,
            label: "Armed Away",
            description: "Fully Armed",
        },
        AlarmState::Arming => DisplayInfo {
            color: StateColor::Yellow,
            icon: StateIcon::Shield,
            label: "Arming",
            description: "Exit Delay",
        },
        AlarmState::Pending => DisplayInfo {
            color: StateColor::Orange,
            icon: StateIcon::Shield,
            label: "Entry Delay",
            description: "Disarm Now",
        },
        AlarmState::Triggered => DisplayInfo {
            color: StateColor::Red,
            icon: StateIcon::Warning,
            label: "TRIGGERED!",
            description: "Alarm Active",
        },
    }
}

/// Map a raw state code straight to its display attributes.
pub fn map_state(code: &str) -> DisplayInfo {
    display_info(AlarmState::from_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_recognized_codes_round_trip() {
        for state in AlarmState::RECOGNIZED {
            let code = state.code().unwrap();
            assert_eq!(AlarmState::from_code(code), state);
        }
    }

    #[test]
    fn test_recognized_states_have_distinct_populated_info() {
        let infos: HashSet<DisplayInfo> = AlarmState::RECOGNIZED
            .iter()
            .map(|s| s.display_info())
            .collect();
        assert_eq!(infos.len(), AlarmState::RECOGNIZED.len());

        for info in infos {
            assert!(!info.label.is_empty());
            assert!(!info.description.is_empty());
        }
    }

    #[test]
    fn test_unrecognized_codes_fall_back_to_disarmed() {
        let disarmed = map_state("disarmed");
        for code in ["", "armed_night", "DISARMED", "unavailable", "armed away"] {
            assert_eq!(map_state(code), disarmed, "code {code:?}");
        }
    }

    #[test]
    fn test_display_table_values() {
        let info = map_state("pending");
        assert_eq!(info.color, StateColor::Orange);
        assert_eq!(info.label, "Entry Delay");
        assert_eq!(info.description, "Disarm Now");

        let info = map_state("triggered");
        assert_eq!(info.color, StateColor::Red);
        assert_eq!(info.icon, StateIcon::Warning);
        assert_eq!(info.label, "TRIGGERED!");

        assert_eq!(map_state("armed_home").icon, StateIcon::Home);
        assert_eq!(map_state("armed_away").icon, StateIcon::Lock);
        assert_eq!(map_state("arming").icon, StateIcon::Shield);
    }

    #[test]
    fn test_offers_arm_options() {
        assert!(AlarmState::Disarmed.offers_arm_options());
        assert!(AlarmState::Arming.offers_arm_options());
        assert!(!AlarmState::ArmedHome.offers_arm_options());
        assert!(!AlarmState::ArmedAway.offers_arm_options());
        assert!(!AlarmState::Pending.offers_arm_options());
        assert!(!AlarmState::Triggered.offers_arm_options());
        assert!(!AlarmState::Unknown.offers_arm_options());
    }

    #[test]
    fn test_display_unknown() {
        assert_eq!(AlarmState::Unknown.to_string(), "unknown");
        assert_eq!(AlarmState::ArmedAway.to_string(), "armed_away");
    }
}
