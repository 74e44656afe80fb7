//! Outbound service calls (`domain`, `service`, payload)

use serde::Serialize;
use serde_json::{Map, Value};

/// Default domain for arm/disarm calls
pub const DEFAULT_ALARM_DOMAIN: &str = "secure_alarm";

/// Alarm service requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmService {
    ArmHome,
    ArmAway,
    Disarm,
}

impl AlarmService {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlarmService::ArmHome => "arm_home",
            AlarmService::ArmAway => "arm_away",
            AlarmService::Disarm => "disarm",
        }
    }
}

impl std::fmt::Display for AlarmService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fire-and-forget request for the external system to change state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub data: Map<String, Value>,
}

impl ServiceCall {
    pub fn new(domain: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
            data: Map::new(),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Arm or disarm; the PIN travels verbatim.
    pub fn alarm(domain: impl Into<String>, service: AlarmService, pin: impl Into<String>) -> Self {
        Self::new(domain, service.as_str()).with_data("pin", pin.into())
    }

    /// Lock/unlock toggle for an entry point.
    ///
    /// `unlock` when the entity currently reports `locked`, `lock` otherwise.
    pub fn toggle_entry(entity_id: &str, current_state: &str) -> Self {
        let service = if current_state == "locked" {
            "unlock"
        } else {
            "lock"
        };
        Self::new(domain_of(entity_id), service).with_data("entity_id", entity_id)
    }

    /// The `pin` payload field, if present and a string.
    pub fn pin(&self) -> Option<&str> {
        self.data.get("pin").and_then(Value::as_str)
    }
}

impl std::fmt::Display for ServiceCall {
    // Never prints the payload: it may carry a PIN.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.domain, self.service)
    }
}

/// Domain prefix of an entity id (`lock.front_door` → `lock`).
///
/// Ids without a separator are returned whole.
pub fn domain_of(entity_id: &str) -> &str {
    entity_id
        .split_once('.')
        .map_or(entity_id, |(domain, _)| domain)
}
