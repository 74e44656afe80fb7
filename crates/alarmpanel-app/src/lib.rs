//! # alarmpanel-app - Panel State Machine
//!
//! The TEA core of Alarm Panel: model, messages, the update function and the
//! pure view-state reducer behind it. No terminal dependencies; the TUI crate
//! feeds [`InputKey`]s in and draws the [`PanelModel`] out.
//!
//! ## Public API
//!
//! ### State Machine
//! - [`PinBuffer`], [`Digit`] - Bounded PIN entry (max 8, submit at 6)
//! - [`ViewMode`], [`ViewState`], [`UserAction`] - Badge / arm options / keypad
//! - [`reduce()`] - Pure `(state, action) -> (state', command?)` step
//!
//! ### TEA
//! - [`AppState`] - Model: config, snapshot, view state, projected model
//! - [`Message`] - Everything that can happen
//! - [`handler::update()`] - Message → state change + optional action
//! - [`process_message()`] - Update loop step with command dispatch
//!
//! ### Display
//! - [`PanelModel`] - Projection the renderer draws
//!
//! ### Integration
//! - [`CommandDispatcher`] - Service call seam; [`HassDispatcher`] in production
//! - [`config`] - `config.toml` loading and token resolution
//! - [`spawn_signal_handler()`], [`spawn_event_forwarder()`]

pub mod config;
pub mod dispatch;
pub mod display;
pub mod forward;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod pin_buffer;
pub mod process;
pub mod signals;
pub mod state;
pub mod view;

pub use config::{IconMode, PanelConfig};
#[cfg(any(test, feature = "test-helpers"))]
pub use dispatch::RecordingDispatcher;
pub use dispatch::{CommandDispatcher, HassDispatcher};
pub use display::{project, EntryPointRow, KeypadModel, PanelModel};
pub use forward::spawn_event_forwarder;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use pin_buffer::{Digit, PinBuffer, MAX_PIN_LEN, MIN_SUBMIT_LEN};
pub use process::process_message;
pub use signals::spawn_signal_handler;
pub use state::{AppPhase, AppState};
pub use view::{reduce, ActionContext, Reduction, UserAction, ViewMode, ViewState};
