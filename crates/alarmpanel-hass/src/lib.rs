//! # alarmpanel-hass - Home Assistant Connection
//!
//! WebSocket client for the Home Assistant API: authentication, initial
//! state load, `state_changed` subscription, and service calls.
//!
//! Depends on [`alarmpanel_core`] for entity types and error handling.
//!
//! ## Public API
//!
//! ### Client
//! - [`HassClient`] - Connects, authenticates and owns the background I/O task
//! - [`HassHandle`] - Clonable sender for fire-and-forget service calls
//! - [`HassEvent`] - Loaded states, state changes and connection transitions
//! - [`ConnectionState`] - Connected / reconnecting / disconnected
//!
//! ### Protocol
//! - [`HassCommand`] - Outbound command frames
//! - [`parse_hass_message()`] - Classify an inbound text frame
//! - [`RequestTracker`] - Match `result` frames to pending requests
//!
//! ### Endpoint
//! - [`websocket_url()`] - Normalize a configured base URL to `/api/websocket`

pub mod client;
pub mod endpoint;
pub mod protocol;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use client::{ConnectionState, HassClient, HassEvent, HassHandle};
#[cfg(any(test, feature = "test-helpers"))]
pub use client::SentCommands;
pub use endpoint::{websocket_url, WEBSOCKET_PATH};
pub use protocol::{
    parse_hass_message, parse_state_changed, HassCommand, HassMessage, HassResponse,
    RequestTracker,
};
