//! Test utilities for Home Assistant payloads
//!
//! Builders for entity states and raw WebSocket frames.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use alarmpanel_core::EntityState;

/// A fixed reference instant (2024-05-01 12:00:00 UTC).
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Entity last changed `minutes_ago` before [`fixed_now()`].
pub fn test_entity(entity_id: &str, state: &str, minutes_ago: i64) -> EntityState {
    EntityState::new(
        entity_id,
        state,
        fixed_now() - chrono::Duration::minutes(minutes_ago),
    )
}

/// Alarm entity with an optional `changed_by` attribute.
pub fn test_alarm_entity(entity_id: &str, code: &str, changed_by: Option<&str>) -> EntityState {
    let entity = test_entity(entity_id, code, 0);
    match changed_by {
        Some(name) => entity.with_attribute("changed_by", name),
        None => entity,
    }
}

/// A `state_changed` event frame as Home Assistant sends it.
pub fn state_changed_frame(subscription_id: u64, entity: &EntityState) -> Value {
    json!({
        "id": subscription_id,
        "type": "event",
        "event": {
            "event_type": "state_changed",
            "data": {
                "entity_id": entity.entity_id,
                "new_state": entity,
            }
        }
    })
}

/// A `result` frame for request `id`.
pub fn result_frame(id: u64, result: Value) -> Value {
    json!({
        "id": id,
        "type": "result",
        "success": true,
        "result": result,
    })
}
