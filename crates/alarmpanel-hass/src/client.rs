//! Async WebSocket client for the Home Assistant API.
//!
//! The [`HassClient`] authenticates against a Home Assistant instance, loads
//! the initial entity states, subscribes to `state_changed` events and
//! forwards everything the panel needs through an mpsc channel.
//!
//! One background task owns the socket. [`HassHandle`]s talk to it over a
//! command channel and everything Home Assistant pushes comes back on the
//! [`HassEvent`] channel, in the order the frames arrived. Only the entities
//! the panel watches are forwarded. On an unexpected close the task
//! reconnects with exponential backoff, re-runs `get_states` and
//! re-subscribes.

use std::collections::HashSet;
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use url::Url;

use alarmpanel_core::prelude::*;
use alarmpanel_core::{EntityState, ServiceCall};

use crate::protocol::{
    parse_hass_message, parse_state_changed, AuthMessage, HassCommand, HassMessage, HassResponse,
    RequestTracker,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Initial reconnection backoff duration.
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Maximum reconnection backoff duration (cap).
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Maximum number of consecutive reconnection attempts before giving up.
const MAX_RECONNECT_ATTEMPTS: u32 = 10;

/// How long the server gets to complete the auth handshake.
const AUTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Capacity of the command channel (bounded, to apply backpressure).
const CMD_CHANNEL_CAPACITY: usize = 32;

/// Capacity of the event channel. A full channel pauses socket reads.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// How often to run stale request cleanup in the I/O loop.
const STALE_REQUEST_CLEANUP_INTERVAL: Duration = Duration::from_secs(30);

/// Timeout after which a pending request is considered stale and removed.
const STALE_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Current connection state of a [`HassClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Initial connection attempt in progress.
    Connecting,
    /// Authenticated and subscribed.
    Connected,
    /// Connection lost; background task is retrying.
    Reconnecting {
        /// The current reconnection attempt number (1-indexed).
        attempt: u32,
    },
    /// Not connected and no longer trying.
    Disconnected,
}

/// Events emitted by the client through the event channel.
#[derive(Debug, Clone, PartialEq)]
pub enum HassEvent {
    /// Watched entities from `get_states`, sent after every (re)connect.
    StatesLoaded(Vec<EntityState>),
    /// One entity changed; `new_state` is `None` when it was removed.
    StateChanged {
        entity_id: String,
        new_state: Option<EntityState>,
    },
    /// The connection state changed.
    Connection(ConnectionState),
}

// ---------------------------------------------------------------------------
// Internal command type
// ---------------------------------------------------------------------------

/// Internal messages sent from the public API to the background task.
enum ClientCommand {
    /// Send a command. A failed reply is logged by the background task.
    Send { command: HassCommand },
    /// Gracefully close the WebSocket connection and stop the background task.
    Disconnect,
}

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

// ---------------------------------------------------------------------------
// HassHandle
// ---------------------------------------------------------------------------

/// A clonable handle for sending commands over the client's connection.
///
/// The handle becomes inoperable when the background task exits; calls then
/// return [`Error::ChannelClosed`].
#[derive(Clone)]
pub struct HassHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl std::fmt::Debug for HassHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HassHandle")
            .field("closed", &self.cmd_tx.is_closed())
            .finish()
    }
}

impl HassHandle {
    /// Queue a service call without waiting for Home Assistant to answer.
    ///
    /// Never blocks. A failed call is logged by the background task.
    ///
    /// # Errors
    ///
    /// - [`Error::ChannelClosed`] if the background task has exited.
    /// - [`Error::ChannelSend`] if the command queue is full.
    pub fn call_service(&self, call: ServiceCall) -> Result<()> {
        self.cmd_tx
            .try_send(ClientCommand::Send {
                command: HassCommand::from(call),
            })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Closed(_) => Error::ChannelClosed,
                mpsc::error::TrySendError::Full(_) => Error::channel_send("command queue full"),
            })
    }

    /// Ask the background task to close the socket and stop reconnecting.
    pub async fn disconnect(&self) {
        // The task may already be gone.
        let _ = self.cmd_tx.send(ClientCommand::Disconnect).await;
    }

    /// Create a handle with no background task behind it.
    ///
    /// The returned [`SentCommands`] yields every command sent through the
    /// handle, for unit tests of code that dispatches service calls.
    #[cfg(any(test, feature = "test-helpers"))]
    pub fn new_for_test(capacity: usize) -> (Self, SentCommands) {
        let (cmd_tx, cmd_rx) = mpsc::channel(capacity);
        (Self { cmd_tx }, SentCommands { cmd_rx })
    }
}

/// Receiving end of a test handle's command channel.
#[cfg(any(test, feature = "test-helpers"))]
pub struct SentCommands {
    cmd_rx: mpsc::Receiver<ClientCommand>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl SentCommands {
    /// Next queued command, if any. Disconnect requests are skipped.
    pub fn try_next(&mut self) -> Option<HassCommand> {
        while let Ok(cmd) = self.cmd_rx.try_recv() {
            if let ClientCommand::Send { command } = cmd {
                return Some(command);
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// HassClient
// ---------------------------------------------------------------------------

/// Async WebSocket client for Home Assistant.
///
/// Create with [`HassClient::connect`], then split with
/// [`HassClient::into_parts`]. The background task exits when the handle and
/// all its clones are dropped, or on [`HassHandle::disconnect`].
pub struct HassClient {
    handle: HassHandle,
    event_rx: mpsc::Receiver<HassEvent>,
}

impl HassClient {
    /// Connect and authenticate, then start the background task.
    ///
    /// The initial `get_states` result and all later state changes of the
    /// `watched` entities arrive on the event channel. Other entities are
    /// dropped on the socket side.
    ///
    /// # Errors
    ///
    /// - [`Error::Connection`] if the socket cannot be opened.
    /// - [`Error::AuthFailed`] if the token is rejected.
    pub async fn connect(
        ws_url: &Url,
        access_token: &str,
        watched: HashSet<String>,
    ) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>(CMD_CHANNEL_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel::<HassEvent>(EVENT_CHANNEL_CAPACITY);

        info!("Connecting to Home Assistant at {}", ws_url);
        let ws_stream = connect_and_authenticate(ws_url.as_str(), access_token).await?;
        publish_state(&event_tx, ConnectionState::Connected).await;

        tokio::spawn(run_client_task(
            ws_url.to_string(),
            access_token.to_string(),
            ws_stream,
            cmd_rx,
            event_tx,
            Session::new(watched),
        ));

        Ok(Self {
            handle: HassHandle { cmd_tx },
            event_rx,
        })
    }

    /// Split into the command handle and the event receiver.
    pub fn into_parts(self) -> (HassHandle, mpsc::Receiver<HassEvent>) {
        (self.handle, self.event_rx)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Inbound routing state owned by the background task.
///
/// Outlives reconnects so request ids are never reused.
struct Session {
    tracker: RequestTracker,
    watched: HashSet<String>,
    /// Id of the `get_states` request whose reply has not arrived yet.
    states_request: Option<u64>,
}

impl Session {
    fn new(watched: HashSet<String>) -> Self {
        Self {
            tracker: RequestTracker::new(),
            watched,
            states_request: None,
        }
    }

    /// Classify one text frame. Returns the event to publish, if any.
    ///
    /// The `get_states` reply is decoded here rather than through the tracker
    /// so it is published before any frame that follows it.
    fn route(&mut self, text: &str) -> Option<HassEvent> {
        match parse_hass_message(text) {
            HassMessage::Response(response) if self.states_request == Some(response.id) => {
                self.states_request = None;
                self.states_loaded(response)
            }
            HassMessage::Response(response) => {
                let id = response.id;
                if !self.tracker.complete(response) {
                    debug!("Home Assistant: result for unknown request id {}", id);
                }
                None
            }
            HassMessage::Event(frame) => {
                let Some(change) = parse_state_changed(&frame.event) else {
                    trace!("Home Assistant: ignoring {} event", frame.event.event_type);
                    return None;
                };
                if !self.watched.contains(&change.entity_id) {
                    return None;
                }
                Some(HassEvent::StateChanged {
                    entity_id: change.entity_id,
                    new_state: change.new_state,
                })
            }
            HassMessage::Pong { id } => {
                trace!("Home Assistant: pong {}", id);
                None
            }
            HassMessage::AuthRequired
            | HassMessage::AuthOk { .. }
            | HassMessage::AuthInvalid { .. } => {
                debug!("Home Assistant: unexpected auth frame after handshake");
                None
            }
            HassMessage::Unknown(raw) => {
                debug!(
                    "Home Assistant: ignoring unknown message: {}",
                    raw.chars().take(120).collect::<String>()
                );
                None
            }
        }
    }

    fn states_loaded(&self, response: HassResponse) -> Option<HassEvent> {
        let states = response_to_result(response).and_then(|result| {
            serde_json::from_value::<Vec<EntityState>>(result)
                .map_err(|e| Error::protocol(format!("parse get_states response: {e}")))
        });
        match states {
            Ok(states) => {
                let total = states.len();
                let states: Vec<EntityState> = states
                    .into_iter()
                    .filter(|entity| self.watched.contains(&entity.entity_id))
                    .collect();
                debug!(
                    "Home Assistant: loaded {} of {} entity states",
                    states.len(),
                    total
                );
                Some(HassEvent::StatesLoaded(states))
            }
            Err(err) => {
                warn!("Home Assistant: get_states failed: {}", err);
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Background task
// ---------------------------------------------------------------------------

/// Entry point for the background WebSocket I/O task.
///
/// Accepts an already-authenticated `ws_stream` for the first connection,
/// then manages reconnection on unexpected disconnects.
async fn run_client_task(
    ws_url: String,
    access_token: String,
    ws_stream: WsStream,
    mut cmd_rx: mpsc::Receiver<ClientCommand>,
    event_tx: mpsc::Sender<HassEvent>,
    mut session: Session,
) {
    let mut reconnect = run_io_loop(ws_stream, &mut cmd_rx, &event_tx, &mut session).await;

    let mut attempt: u32 = 1;
    while reconnect {
        if attempt > MAX_RECONNECT_ATTEMPTS {
            error!(
                "Home Assistant: exceeded {} reconnection attempts, giving up",
                MAX_RECONNECT_ATTEMPTS
            );
            break;
        }

        publish_state(&event_tx, ConnectionState::Reconnecting { attempt }).await;

        let backoff = compute_backoff(attempt);
        warn!(
            "Home Assistant: connection lost, retrying in {:?} (attempt {}/{})",
            backoff, attempt, MAX_RECONNECT_ATTEMPTS
        );
        tokio::time::sleep(backoff).await;

        // The client was dropped while we slept; no point reconnecting.
        if cmd_rx.is_closed() {
            break;
        }

        match connect_and_authenticate(&ws_url, &access_token).await {
            Ok(ws_stream) => {
                info!("Home Assistant: reconnected (attempt {})", attempt);
                publish_state(&event_tx, ConnectionState::Connected).await;
                attempt = 1;
                reconnect = run_io_loop(ws_stream, &mut cmd_rx, &event_tx, &mut session).await;
            }
            Err(err) if err.is_fatal() => {
                error!("Home Assistant: {}", err);
                break;
            }
            Err(err) => {
                warn!(
                    "Home Assistant: reconnection attempt {} failed: {}",
                    attempt, err
                );
                attempt += 1;
            }
        }
    }

    publish_state(&event_tx, ConnectionState::Disconnected).await;
    debug!("Home Assistant background task exiting");
}

/// Run one connection's read/write select loop.
///
/// Returns `true` if the connection was lost unexpectedly (caller should
/// reconnect), or `false` if the task should terminate.
async fn run_io_loop(
    ws_stream: WsStream,
    cmd_rx: &mut mpsc::Receiver<ClientCommand>,
    event_tx: &mpsc::Sender<HassEvent>,
    session: &mut Session,
) -> bool {
    let (mut ws_sink, mut ws_stream) = ws_stream.split();

    bootstrap(&mut ws_sink, session).await;

    let mut cleanup_interval = tokio::time::interval(STALE_REQUEST_CLEANUP_INTERVAL);
    cleanup_interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            frame = ws_stream.next() => {
                match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        let Some(event) = session.route(text.as_str()) else {
                            continue;
                        };
                        // Waits for room rather than dropping; the next frame is
                        // not read until this one is queued.
                        if event_tx.send(event).await.is_err() {
                            debug!("Home Assistant: event receiver dropped, shutting down");
                            send_close(&mut ws_sink).await;
                            return false;
                        }
                    }
                    Some(Ok(WsMessage::Close(_))) => {
                        debug!("Home Assistant: received Close frame");
                        return true;
                    }
                    Some(Ok(_)) => {
                        // Ping/Pong/Binary
                    }
                    Some(Err(err)) => {
                        warn!("Home Assistant: WebSocket read error: {}", err);
                        return true;
                    }
                    None => {
                        debug!("Home Assistant: WebSocket stream ended");
                        return true;
                    }
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(ClientCommand::Send { command }) => {
                        send_command(command, &mut session.tracker, &mut ws_sink).await;
                    }
                    Some(ClientCommand::Disconnect) => {
                        send_close(&mut ws_sink).await;
                        return false;
                    }
                    None => {
                        debug!("Home Assistant: command channel closed, shutting down");
                        send_close(&mut ws_sink).await;
                        return false;
                    }
                }
            }

            _ = cleanup_interval.tick() => {
                let stale = session.tracker.cleanup_stale(STALE_REQUEST_TIMEOUT);
                if !stale.is_empty() {
                    debug!(
                        "Home Assistant: cleaned up {} stale request(s): {:?}",
                        stale.len(),
                        stale,
                    );
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Open the socket and complete the auth handshake.
async fn connect_and_authenticate(ws_url: &str, access_token: &str) -> Result<WsStream> {
    let (mut ws_stream, _response) = connect_async(ws_url)
        .await
        .map_err(|err| Error::connection(format!("Failed to connect to Home Assistant: {err}")))?;

    match tokio::time::timeout(AUTH_TIMEOUT, authenticate(&mut ws_stream, access_token)).await {
        Ok(Ok(ha_version)) => {
            info!(
                "Home Assistant: authenticated (version {})",
                ha_version.as_deref().unwrap_or("unknown")
            );
            Ok(ws_stream)
        }
        Ok(Err(err)) => Err(err),
        Err(_) => Err(Error::connection("timed out waiting for auth handshake")),
    }
}

/// `auth_required` → `auth` → `auth_ok` | `auth_invalid`.
async fn authenticate(ws_stream: &mut WsStream, access_token: &str) -> Result<Option<String>> {
    match next_message(ws_stream).await? {
        HassMessage::AuthRequired => {}
        other => {
            return Err(Error::protocol(format!(
                "expected auth_required, got {other:?}"
            )))
        }
    }

    let auth = serde_json::to_string(&AuthMessage::new(access_token))?;
    ws_stream
        .send(WsMessage::Text(auth.into()))
        .await
        .map_err(|err| Error::connection(format!("Failed to send auth: {err}")))?;

    match next_message(ws_stream).await? {
        HassMessage::AuthOk { ha_version } => Ok(ha_version),
        HassMessage::AuthInvalid { message } => Err(Error::auth_failed(message)),
        other => Err(Error::protocol(format!(
            "unexpected reply to auth: {other:?}"
        ))),
    }
}

/// Read frames until a text frame arrives.
async fn next_message(ws_stream: &mut WsStream) -> Result<HassMessage> {
    loop {
        match ws_stream.next().await {
            Some(Ok(WsMessage::Text(text))) => return Ok(parse_hass_message(text.as_str())),
            Some(Ok(WsMessage::Close(_))) | None => {
                return Err(Error::connection("connection closed during handshake"))
            }
            Some(Ok(_)) => continue,
            Some(Err(err)) => {
                return Err(Error::connection(format!("WebSocket read error: {err}")))
            }
        }
    }
}

/// Compute exponential backoff duration for reconnection attempt `n`.
///
/// The formula is `INITIAL_BACKOFF * 2^(n-1)`, capped at `MAX_BACKOFF`.
fn compute_backoff(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1);
    let multiplier: u64 = 1u64.checked_shl(exponent).unwrap_or(u64::MAX);
    let secs = INITIAL_BACKOFF.as_secs().saturating_mul(multiplier);
    Duration::from_secs(secs.min(MAX_BACKOFF.as_secs()))
}

async fn publish_state(event_tx: &mpsc::Sender<HassEvent>, state: ConnectionState) {
    if event_tx.send(HassEvent::Connection(state)).await.is_err() {
        debug!("Home Assistant: event receiver dropped, connection state not published");
    }
}

/// Load all states and subscribe to changes on a fresh connection.
///
/// Replies are routed by the subsequent I/O loop.
async fn bootstrap(ws_sink: &mut SplitSink<WsStream, WsMessage>, session: &mut Session) {
    // Replies to requests sent on a dead connection will never arrive.
    session.tracker.clear();

    let id = session.tracker.allocate_id();
    session.states_request = match write_command(&HassCommand::GetStates, id, ws_sink).await {
        Ok(()) => Some(id),
        Err(err) => {
            warn!("Home Assistant: {}", err);
            None
        }
    };

    send_command(
        HassCommand::subscribe_state_changes(),
        &mut session.tracker,
        ws_sink,
    )
    .await;
}

/// Register a pending request and write it to the sink.
///
/// A failed reply is logged; a successful one is dropped.
async fn send_command(
    command: HassCommand,
    tracker: &mut RequestTracker,
    ws_sink: &mut SplitSink<WsStream, WsMessage>,
) {
    let name = command.name();
    // Register before touching the wire so the slot exists if the reply races the send.
    let (id, response_rx) = tracker.register();

    if let Err(err) = write_command(&command, id, ws_sink).await {
        warn!("Home Assistant: {}", err);
        return;
    }

    tokio::spawn(async move {
        match response_rx.await {
            Ok(response) => {
                if let Err(err) = response_to_result(response) {
                    warn!("Home Assistant: {} failed: {}", name, err);
                }
            }
            // Dropped by stale cleanup or a reconnect.
            Err(_) => debug!("Home Assistant: no reply to {} (id {})", name, id),
        }
    });
}

/// Serialize `command` with `id` and write it to the sink.
async fn write_command(
    command: &HassCommand,
    id: u64,
    ws_sink: &mut SplitSink<WsStream, WsMessage>,
) -> Result<()> {
    let name = command.name();
    let frame = command
        .to_frame(id)
        .map_err(|err| Error::protocol(format!("Failed to serialize {name}: {err}")))?;

    ws_sink
        .send(WsMessage::Text(frame.into()))
        .await
        .map_err(|err| Error::connection(format!("Failed to send {name}: {err}")))?;
    debug!("Home Assistant: sent {} (id {})", name, id);
    Ok(())
}

/// Convert a `result` frame into the payload or a protocol error.
fn response_to_result(response: HassResponse) -> Result<Value> {
    if response.success {
        Ok(response.result.unwrap_or(Value::Null))
    } else {
        let (code, message) = response
            .error
            .map(|e| (e.code.to_string(), e.message))
            .unwrap_or_else(|| ("unknown".to_string(), "no error details".to_string()));
        Err(Error::protocol(format!("Home Assistant error {code}: {message}")))
    }
}

/// Send a WebSocket Close frame, ignoring any write errors.
async fn send_close(ws_sink: &mut SplitSink<WsStream, WsMessage>) {
    let _ = ws_sink.send(WsMessage::Close(None)).await;
    let _ = ws_sink.close().await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::HassError;
    use crate::test_utils::{result_frame, state_changed_frame, test_entity};
    use serde_json::json;
    use tokio::net::{TcpListener, TcpStream};
    use tokio_tungstenite::accept_async;

    const ALARM: &str = "alarm_control_panel.home";
    const DOOR: &str = "lock.front_door";

    fn watched() -> HashSet<String> {
        [ALARM, DOOR].into_iter().map(String::from).collect()
    }

    fn kind(event: &HassEvent) -> String {
        match event {
            HassEvent::StatesLoaded(states) => {
                let alarm = states.iter().find(|s| s.entity_id == ALARM);
                format!("StatesLoaded({})", alarm.map_or("-", |s| s.state.as_str()))
            }
            HassEvent::StateChanged {
                entity_id,
                new_state,
            } => format!(
                "StateChanged({entity_id}={})",
                new_state.as_ref().map_or("-", |s| s.state.as_str())
            ),
            HassEvent::Connection(state) => format!("Connection({state:?})"),
        }
    }

    // -- compute_backoff -----------------------------------------------------

    #[test]
    fn test_reconnection_backoff_doubles() {
        assert_eq!(compute_backoff(1), Duration::from_secs(1));
        assert_eq!(compute_backoff(2), Duration::from_secs(2));
        assert_eq!(compute_backoff(3), Duration::from_secs(4));
        assert_eq!(compute_backoff(5), Duration::from_secs(16));
    }

    #[test]
    fn test_reconnection_backoff_capped_at_max() {
        assert_eq!(compute_backoff(6), MAX_BACKOFF);
        assert_eq!(compute_backoff(MAX_RECONNECT_ATTEMPTS), MAX_BACKOFF);
        assert_eq!(compute_backoff(u32::MAX), MAX_BACKOFF);
    }

    // -- response_to_result --------------------------------------------------

    #[test]
    fn test_response_to_result_success() {
        let response = HassResponse {
            id: 1,
            success: true,
            result: Some(json!([1, 2])),
            error: None,
        };
        assert_eq!(response_to_result(response).unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_response_to_result_success_without_payload_is_null() {
        let response = HassResponse {
            id: 1,
            success: true,
            result: None,
            error: None,
        };
        assert_eq!(response_to_result(response).unwrap(), Value::Null);
    }

    #[test]
    fn test_response_to_result_error() {
        let response = HassResponse {
            id: 1,
            success: false,
            result: None,
            error: Some(HassError {
                code: json!("service_validation_error"),
                message: "Invalid code".to_string(),
            }),
        };
        let err = response_to_result(response).unwrap_err();
        assert!(matches!(err, Error::Protocol { .. }));
        assert!(err.to_string().contains("Invalid code"));
    }

    // -- Session::route ------------------------------------------------------

    #[test]
    fn test_route_result_to_tracker() {
        let mut session = Session::new(watched());
        let (id, mut rx) = session.tracker.register();

        let frame = json!({"id": id, "type": "result", "success": true, "result": null});
        assert!(session.route(&frame.to_string()).is_none());

        assert!(rx.try_recv().unwrap().success);
        assert_eq!(session.tracker.pending_count(), 0);
    }

    #[test]
    fn test_route_states_reply_keeps_only_watched() {
        let mut session = Session::new(watched());
        let id = session.tracker.allocate_id();
        session.states_request = Some(id);

        let states = json!([
            test_entity(ALARM, "armed_home", 0),
            test_entity("sensor.outdoor_temperature", "12.5", 1),
            test_entity(DOOR, "locked", 3),
        ]);
        let event = session.route(&result_frame(id, states).to_string());

        match event {
            Some(HassEvent::StatesLoaded(states)) => {
                let ids: Vec<&str> = states.iter().map(|s| s.entity_id.as_str()).collect();
                assert_eq!(ids, vec![ALARM, DOOR]);
            }
            other => panic!("Expected StatesLoaded, got {:?}", other),
        }
        assert!(session.states_request.is_none());
    }

    #[test]
    fn test_route_failed_states_reply_publishes_nothing() {
        let mut session = Session::new(watched());
        session.states_request = Some(4);

        let frame = json!({
            "id": 4,
            "type": "result",
            "success": false,
            "error": {"code": "unknown_error", "message": "boom"}
        });
        assert!(session.route(&frame.to_string()).is_none());
        assert!(session.states_request.is_none());
    }

    #[test]
    fn test_route_forwards_watched_state_change() {
        let mut session = Session::new(watched());

        let frame = state_changed_frame(2, &test_entity(DOOR, "unlocked", 0));
        match session.route(&frame.to_string()) {
            Some(HassEvent::StateChanged {
                entity_id,
                new_state,
            }) => {
                assert_eq!(entity_id, DOOR);
                assert_eq!(new_state.unwrap().state, "unlocked");
            }
            other => panic!("Expected StateChanged, got {:?}", other),
        }
    }

    #[test]
    fn test_route_drops_unwatched_state_change() {
        let mut session = Session::new(watched());

        let frame = state_changed_frame(2, &test_entity("sensor.outdoor_temperature", "13", 0));
        assert!(session.route(&frame.to_string()).is_none());
    }

    #[test]
    fn test_route_ignores_unknown() {
        let mut session = Session::new(watched());
        assert!(session.route("{\"type\":\"mystery\"}").is_none());
    }

    // -- HassHandle ----------------------------------------------------------

    #[test]
    fn test_call_service_queues_without_waiting() {
        let (handle, mut sent) = HassHandle::new_for_test(4);

        handle
            .call_service(ServiceCall::toggle_entry("lock.back_door", "unlocked"))
            .unwrap();

        match sent.try_next() {
            Some(HassCommand::CallService {
                domain, service, ..
            }) => {
                assert_eq!(domain, "lock");
                assert_eq!(service, "lock");
            }
            other => panic!("Expected CallService, got {:?}", other),
        }
        assert!(sent.try_next().is_none());
    }

    #[test]
    fn test_call_service_full_queue_is_error() {
        let (handle, _sent) = HassHandle::new_for_test(1);
        let call = ServiceCall::toggle_entry("lock.back_door", "locked");

        handle.call_service(call.clone()).unwrap();
        let err = handle.call_service(call).unwrap_err();
        assert!(matches!(err, Error::ChannelSend { .. }));
    }

    #[test]
    fn test_call_service_closed_channel() {
        let (handle, sent) = HassHandle::new_for_test(1);
        drop(sent);

        let err = handle
            .call_service(ServiceCall::toggle_entry("lock.back_door", "locked"))
            .unwrap_err();
        assert!(matches!(err, Error::ChannelClosed));
    }

    #[tokio::test]
    async fn test_publish_state_sends_connection_event() {
        let (event_tx, mut event_rx) = mpsc::channel(4);

        publish_state(&event_tx, ConnectionState::Reconnecting { attempt: 2 }).await;

        assert_eq!(
            event_rx.try_recv().unwrap(),
            HassEvent::Connection(ConnectionState::Reconnecting { attempt: 2 })
        );
    }

    // -- Local server --------------------------------------------------------

    async fn read_text(ws: &mut WebSocketStream<TcpStream>) -> Value {
        loop {
            match ws.next().await {
                Some(Ok(WsMessage::Text(text))) => {
                    return serde_json::from_str(text.as_str()).unwrap()
                }
                Some(Ok(_)) => continue,
                other => panic!("Expected text frame, got {:?}", other),
            }
        }
    }

    async fn write_json(ws: &mut WebSocketStream<TcpStream>, value: Value) {
        ws.send(WsMessage::Text(value.to_string().into()))
            .await
            .unwrap();
    }

    /// Answers `get_states` with a large disarmed snapshot and pushes newer
    /// changes right behind it, in one burst.
    async fn serve_snapshot_then_changes(listener: TcpListener) {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(tcp).await.unwrap();

        write_json(&mut ws, json!({"type": "auth_required", "ha_version": "2024.5.0"})).await;
        assert_eq!(read_text(&mut ws).await["type"], "auth");
        write_json(&mut ws, json!({"type": "auth_ok", "ha_version": "2024.5.0"})).await;

        let get_states = read_text(&mut ws).await;
        assert_eq!(get_states["type"], "get_states");
        let subscribe = read_text(&mut ws).await;
        assert_eq!(subscribe["type"], "subscribe_events");
        let sub_id = subscribe["id"].as_u64().unwrap();

        let mut states = vec![test_entity(ALARM, "disarmed", 10)];
        states.extend(
            (0..5_000).map(|n| test_entity(&format!("sensor.climate_{n}"), "21.5", 1)),
        );
        let get_states_id = get_states["id"].as_u64().unwrap();

        write_json(&mut ws, result_frame(get_states_id, json!(states))).await;
        write_json(&mut ws, result_frame(sub_id, Value::Null)).await;
        write_json(
            &mut ws,
            state_changed_frame(sub_id, &test_entity("sensor.climate_7", "22.0", 0)),
        )
        .await;
        write_json(
            &mut ws,
            state_changed_frame(sub_id, &test_entity(ALARM, "triggered", 0)),
        )
        .await;

        // Hold the socket open until the client hangs up.
        while let Some(Ok(frame)) = ws.next().await {
            if frame.is_close() {
                break;
            }
        }
    }

    #[tokio::test]
    async fn test_snapshot_published_before_later_changes() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(serve_snapshot_then_changes(listener));

        let url = Url::parse(&format!("ws://127.0.0.1:{port}/api/websocket")).unwrap();
        let client = HassClient::connect(&url, "token", watched()).await.unwrap();
        let (handle, mut event_rx) = client.into_parts();

        let mut seen = Vec::new();
        for _ in 0..3 {
            let event = tokio::time::timeout(Duration::from_secs(5), event_rx.recv())
                .await
                .unwrap()
                .unwrap();
            seen.push(kind(&event));
        }

        assert_eq!(
            seen,
            vec![
                "Connection(Connected)".to_string(),
                "StatesLoaded(disarmed)".to_string(),
                format!("StateChanged({ALARM}=triggered)"),
            ]
        );

        handle.disconnect().await;
        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap();
    }
}
