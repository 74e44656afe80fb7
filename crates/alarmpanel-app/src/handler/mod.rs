//! Handler module - TEA update function and key bindings
//!
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers per view mode

pub(crate) mod keys;
pub(crate) mod update;


use alarmpanel_core::ServiceCall;

use crate::message::Message;

pub use keys::handle_key;
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Send a service call to Home Assistant (fire-and-forget)
    CallService(ServiceCall),
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
