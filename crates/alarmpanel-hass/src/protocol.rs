//! Home Assistant WebSocket API message types.
//!
//! The API exchanges JSON text frames. After the auth handshake every client
//! request carries an integer `id`; the server echoes it on `result` replies
//! and on `event` frames that belong to a subscription. This module defines
//! the outbound commands, the inbound frame discriminant and a request tracker
//! that correlates replies with their requests.
//!
//! Protocol reference: <https://developers.home-assistant.io/docs/api/websocket>

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::oneshot;

use alarmpanel_core::{EntityState, ServiceCall};

/// Event type carrying entity state transitions.
pub const STATE_CHANGED_EVENT: &str = "state_changed";

// ---------------------------------------------------------------------------
// Auth handshake
// ---------------------------------------------------------------------------

/// The `auth` frame sent in reply to `auth_required`.
#[derive(Debug, Serialize)]
pub struct AuthMessage<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub access_token: &'a str,
}

impl<'a> AuthMessage<'a> {
    pub fn new(access_token: &'a str) -> Self {
        Self {
            kind: "auth",
            access_token,
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound commands
// ---------------------------------------------------------------------------

/// A command sent after authentication. Serialized with its `id` by
/// [`HassCommand::to_frame`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HassCommand {
    /// Fetch every entity's current state.
    GetStates,
    /// Subscribe to an event type on the bus.
    SubscribeEvents { event_type: String },
    /// Invoke a service.
    CallService {
        domain: String,
        service: String,
        service_data: Map<String, Value>,
    },
}

impl HassCommand {
    pub fn subscribe_state_changes() -> Self {
        HassCommand::SubscribeEvents {
            event_type: STATE_CHANGED_EVENT.to_string(),
        }
    }

    /// Short name for logging; never includes the payload.
    pub fn name(&self) -> &'static str {
        match self {
            HassCommand::GetStates => "get_states",
            HassCommand::SubscribeEvents { .. } => "subscribe_events",
            HassCommand::CallService { .. } => "call_service",
        }
    }

    /// Serialize into a text frame carrying `id`.
    pub fn to_frame(&self, id: u64) -> serde_json::Result<String> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(ref mut map) = value {
            map.insert("id".to_string(), Value::from(id));
        }
        serde_json::to_string(&value)
    }
}

impl From<ServiceCall> for HassCommand {
    fn from(call: ServiceCall) -> Self {
        HassCommand::CallService {
            domain: call.domain,
            service: call.service,
            service_data: call.data,
        }
    }
}

// ---------------------------------------------------------------------------
// Inbound frames
// ---------------------------------------------------------------------------

/// Error object on an unsuccessful `result`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HassError {
    /// String codes on current servers, integers on older ones
    pub code: Value,
    pub message: String,
}

/// Reply to one of our commands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HassResponse {
    pub id: u64,
    pub success: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<HassError>,
}

/// An event delivered on a subscription.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventFrame {
    pub id: u64,
    pub event: BusEvent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BusEvent {
    pub event_type: String,
    #[serde(default)]
    pub data: Value,
}

/// Payload of a `state_changed` event. `new_state` is null when the entity
/// was removed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StateChangedData {
    pub entity_id: String,
    #[serde(default)]
    pub new_state: Option<EntityState>,
}

/// The result of parsing a raw WebSocket text frame.
#[derive(Debug)]
pub enum HassMessage {
    AuthRequired,
    AuthOk { ha_version: Option<String> },
    AuthInvalid { message: String },
    Response(HassResponse),
    Event(EventFrame),
    Pong { id: u64 },
    /// A frame we received but could not interpret.
    Unknown(String),
}

/// Parse a raw text frame by its `type` field.
pub fn parse_hass_message(text: &str) -> HassMessage {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(_) => return HassMessage::Unknown(text.to_string()),
    };

    let kind = value.get("type").and_then(Value::as_str).unwrap_or("");
    match kind {
        "auth_required" => HassMessage::AuthRequired,
        "auth_ok" => HassMessage::AuthOk {
            ha_version: value
                .get("ha_version")
                .and_then(Value::as_str)
                .map(str::to_string),
        },
        "auth_invalid" => HassMessage::AuthInvalid {
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("invalid access token")
                .to_string(),
        },
        "result" => match serde_json::from_value::<HassResponse>(value) {
            Ok(response) => HassMessage::Response(response),
            Err(_) => HassMessage::Unknown(text.to_string()),
        },
        "event" => match serde_json::from_value::<EventFrame>(value) {
            Ok(event) => HassMessage::Event(event),
            Err(_) => HassMessage::Unknown(text.to_string()),
        },
        "pong" => match value.get("id").and_then(Value::as_u64) {
            Some(id) => HassMessage::Pong { id },
            None => HassMessage::Unknown(text.to_string()),
        },
        _ => HassMessage::Unknown(text.to_string()),
    }
}

/// Decode a `state_changed` event's data. Other event types yield `None`.
pub fn parse_state_changed(event: &BusEvent) -> Option<StateChangedData> {
    if event.event_type != STATE_CHANGED_EVENT {
        return None;
    }
    serde_json::from_value(event.data.clone()).ok()
}

// ---------------------------------------------------------------------------
// Request tracker
// ---------------------------------------------------------------------------

/// A registered pending request waiting for its `result`.
struct PendingRequest {
    response_tx: oneshot::Sender<HassResponse>,
    created_at: Instant,
}

/// Tracks in-flight requests and matches them to `result` frames.
///
/// Ids increase monotonically for the lifetime of the tracker, which outlives
/// reconnects, so ids are never reused on a connection.
pub struct RequestTracker {
    next_id: u64,
    pending: HashMap<u64, PendingRequest>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: HashMap::new(),
        }
    }

    /// Reserve an id without a pending slot. The caller routes its reply.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Allocate an id and register a pending slot for it.
    pub fn register(&mut self) -> (u64, oneshot::Receiver<HassResponse>) {
        let id = self.allocate_id();
        let (tx, rx) = oneshot::channel();

        self.pending.insert(
            id,
            PendingRequest {
                response_tx: tx,
                created_at: Instant::now(),
            },
        );

        (id, rx)
    }

    /// Deliver a response to its waiting caller.
    ///
    /// Returns `false` if no request with that id is pending.
    pub fn complete(&mut self, response: HassResponse) -> bool {
        if let Some(pending) = self.pending.remove(&response.id) {
            let _ = pending.response_tx.send(response);
            true
        } else {
            false
        }
    }

    /// Drop requests pending longer than `timeout`; returns their ids.
    pub fn cleanup_stale(&mut self, timeout: Duration) -> Vec<u64> {
        let now = Instant::now();

        let stale: Vec<u64> = self
            .pending
            .iter()
            .filter(|(_, req)| now.duration_since(req.created_at) > timeout)
            .map(|(id, _)| *id)
            .collect();

        for id in &stale {
            self.pending.remove(id);
        }

        stale
    }

    /// Drop every pending request. Waiters observe a closed channel.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
