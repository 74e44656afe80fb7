//! Command dispatch seam
//!
//! The update loop never talks to Home Assistant directly. Service calls go
//! through a [`CommandDispatcher`], which production wires to the WebSocket
//! client and tests replace with a recorder or a mock.

use alarmpanel_core::prelude::*;
use alarmpanel_core::ServiceCall;
use alarmpanel_hass::HassHandle;

/// Fire-and-forget sink for service calls.
#[cfg_attr(test, mockall::automock)]
pub trait CommandDispatcher {
    /// Send `call` without waiting for an acknowledgment. Failures are the
    /// dispatcher's to log; nothing is reported back.
    fn dispatch(&self, call: ServiceCall);
}

/// Dispatcher backed by the Home Assistant client.
#[derive(Debug, Clone)]
pub struct HassDispatcher {
    handle: HassHandle,
}

impl HassDispatcher {
    pub fn new(handle: HassHandle) -> Self {
        Self { handle }
    }
}

impl CommandDispatcher for HassDispatcher {
    fn dispatch(&self, call: ServiceCall) {
        let name = call.to_string();
        if let Err(e) = self.handle.call_service(call) {
            warn!("Failed to dispatch {}: {}", name, e);
        }
    }
}

/// Dispatcher that records every call, for tests.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    calls: std::sync::Mutex<Vec<ServiceCall>>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls dispatched so far, in order.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Drain the recorded calls.
    pub fn take(&self) -> Vec<ServiceCall> {
        self.calls
            .lock()
            .map(|mut calls| std::mem::take(&mut *calls))
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl CommandDispatcher for RecordingDispatcher {
    fn dispatch(&self, call: ServiceCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alarmpanel_core::AlarmService;
    use alarmpanel_hass::HassCommand;

    #[test]
    fn test_hass_dispatcher_queues_service_call() {
        let (handle, mut sent) = HassHandle::new_for_test(4);
        let dispatcher = HassDispatcher::new(handle);

        dispatcher.dispatch(ServiceCall::alarm("secure_alarm", AlarmService::Disarm, "654321"));

        match sent.try_next() {
            Some(HassCommand::CallService {
                domain,
                service,
                service_data,
            }) => {
                assert_eq!(domain, "secure_alarm");
                assert_eq!(service, "disarm");
                assert_eq!(
                    service_data.get("pin").and_then(|v| v.as_str()),
                    Some("654321")
                );
            }
            other => panic!("Expected CallService, got {:?}", other),
        }
    }

    #[test]
    fn test_hass_dispatcher_swallows_closed_channel() {
        let (handle, sent) = HassHandle::new_for_test(1);
        drop(sent);

        // Logged, not propagated.
        HassDispatcher::new(handle).dispatch(ServiceCall::toggle_entry("lock.a", "locked"));
    }

    #[test]
    fn test_recording_dispatcher() {
        let recorder = RecordingDispatcher::new();
        recorder.dispatch(ServiceCall::toggle_entry("lock.a", "locked"));
        recorder.dispatch(ServiceCall::toggle_entry("lock.b", "unlocked"));

        assert_eq!(recorder.calls().len(), 2);
        let taken = recorder.take();
        assert_eq!(taken[1].service, "lock");
        assert!(recorder.calls().is_empty());
    }
}
