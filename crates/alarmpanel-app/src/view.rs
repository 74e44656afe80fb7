//! Interaction state machine: badge → arm options / keypad
//!
//! [`ViewState`] holds the only state the panel owns: whether the interface
//! overlay was requested and the PIN typed so far. Which overlay is shown is
//! not stored; [`ViewMode::resolve`] derives it from the current alarm state
//! every time, so an alarm change while the overlay is open switches it.
//!
//! [`reduce`] is a pure `(state, action) -> (state', command?)` step.

use alarmpanel_core::prelude::*;
use alarmpanel_core::{AlarmService, AlarmState, ServiceCall, StateSnapshot};

use crate::pin_buffer::{Digit, PinBuffer};

/// Which face of the panel is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Badge,
    ArmOptions,
    Keypad,
}

impl ViewMode {
    /// `Badge` unless the interface was requested; then `ArmOptions` for
    /// `disarmed`/`arming` and `Keypad` for everything else.
    pub fn resolve(interface_requested: bool, alarm: AlarmState) -> Self {
        if !interface_requested {
            ViewMode::Badge
        } else if alarm.offers_arm_options() {
            ViewMode::ArmOptions
        } else {
            ViewMode::Keypad
        }
    }

    pub fn is_overlay(&self) -> bool {
        !matches!(self, ViewMode::Badge)
    }
}

/// Panel-owned view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    interface_requested: bool,
    pin: PinBuffer,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interface_requested(&self) -> bool {
        self.interface_requested
    }

    pub fn pin(&self) -> &PinBuffer {
        &self.pin
    }

    pub fn mode(&self, alarm: AlarmState) -> ViewMode {
        ViewMode::resolve(self.interface_requested, alarm)
    }
}

/// A discrete user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    AppendDigit(Digit),
    Clear,
    Submit,
    OpenInterface,
    Close,
    ArmHome,
    ArmAway,
    /// Lock/unlock the entry point with this entity id.
    ToggleEntry(String),
}

impl UserAction {
    pub fn name(&self) -> &'static str {
        match self {
            UserAction::AppendDigit(_) => "append_digit",
            UserAction::Clear => "clear",
            UserAction::Submit => "submit",
            UserAction::OpenInterface => "open_interface",
            UserAction::Close => "close",
            UserAction::ArmHome => "arm_home",
            UserAction::ArmAway => "arm_away",
            UserAction::ToggleEntry(_) => "toggle_entry",
        }
    }
}

/// Read-only inputs a reduction needs besides the view state.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    /// Current alarm state (from the last projected snapshot).
    pub alarm: AlarmState,
    /// Domain for `arm_home` / `arm_away` / `disarm`.
    pub alarm_domain: &'a str,
    /// PIN sent with arm commands.
    pub arm_code: &'a str,
    pub snapshot: &'a StateSnapshot,
}

/// Outcome of one reduction step.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub state: ViewState,
    pub command: Option<ServiceCall>,
}

impl Reduction {
    fn unchanged(state: ViewState) -> Self {
        Self {
            state,
            command: None,
        }
    }

    fn with_command(state: ViewState, command: ServiceCall) -> Self {
        Self {
            state,
            command: Some(command),
        }
    }
}

/// Apply one user action.
///
/// Actions that make no sense in the current mode (a digit while the arm
/// options are shown, arming from the keypad, ...) leave the state unchanged
/// and issue nothing.
pub fn reduce(state: ViewState, action: UserAction, ctx: &ActionContext<'_>) -> Reduction {
    let mode = state.mode(ctx.alarm);

    match (mode, action) {
        (ViewMode::Badge, UserAction::OpenInterface) => Reduction::unchanged(ViewState {
            interface_requested: true,
            ..state
        }),

        (_, UserAction::Close) => Reduction::unchanged(ViewState::default()),

        (ViewMode::ArmOptions, UserAction::ArmHome) => arm(state, AlarmService::ArmHome, ctx),
        (ViewMode::ArmOptions, UserAction::ArmAway) => arm(state, AlarmService::ArmAway, ctx),

        (ViewMode::Keypad, UserAction::AppendDigit(digit)) => {
            let mut state = state;
            if !state.pin.append(digit) {
                trace!("PIN buffer full, ignoring digit");
            }
            Reduction::unchanged(state)
        }
        (ViewMode::Keypad, UserAction::Clear) => {
            let mut state = state;
            state.pin.clear();
            Reduction::unchanged(state)
        }
        (ViewMode::Keypad, UserAction::Submit) => match state.pin.submit() {
            Some(pin) => Reduction::with_command(
                ViewState::default(),
                ServiceCall::alarm(ctx.alarm_domain, AlarmService::Disarm, pin),
            ),
            None => {
                trace!("Submit ignored: {} digit(s) entered", state.pin.len());
                Reduction::unchanged(state)
            }
        },

        (_, UserAction::ToggleEntry(entity_id)) => match ctx.snapshot.get(&entity_id) {
            Some(entity) => {
                let call = ServiceCall::toggle_entry(&entity_id, &entity.state);
                Reduction::with_command(state, call)
            }
            None => {
                debug!("Toggle ignored: {} not in snapshot", entity_id);
                Reduction::unchanged(state)
            }
        },

        (mode, action) => {
            debug!("Ignoring {} in {:?} mode", action.name(), mode);
            Reduction::unchanged(state)
        }
    }
}

fn arm(state: ViewState, service: AlarmService, ctx: &ActionContext<'_>) -> Reduction {
    let call = ServiceCall::alarm(ctx.alarm_domain, service, ctx.arm_code);
    Reduction::with_command(
        ViewState {
            interface_requested: false,
            ..state
        },
        call,
    )
}
