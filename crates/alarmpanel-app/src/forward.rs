//! Bridges Home Assistant client events into the message channel

use tokio::sync::mpsc;

use alarmpanel_core::prelude::*;
use alarmpanel_hass::HassEvent;

use crate::message::Message;

/// Forward every [`HassEvent`] as a [`Message`] until either side closes.
pub fn spawn_event_forwarder(
    mut event_rx: mpsc::Receiver<HassEvent>,
    msg_tx: mpsc::Sender<Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if msg_tx.send(Message::from(event)).await.is_err() {
                debug!("Message channel closed, stopping event forwarder");
                return;
            }
        }
        debug!("Home Assistant event channel closed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alarmpanel_hass::test_utils::test_entity;
    use alarmpanel_hass::ConnectionState;

    #[tokio::test]
    async fn test_forwards_events_in_order() {
        let (event_tx, event_rx) = mpsc::channel(8);
        let (msg_tx, mut msg_rx) = mpsc::channel(8);
        let task = spawn_event_forwarder(event_rx, msg_tx);

        event_tx
            .send(HassEvent::Connection(ConnectionState::Connected))
            .await
            .unwrap();
        event_tx
            .send(HassEvent::StateChanged {
                entity_id: "lock.a".to_string(),
                new_state: Some(test_entity("lock.a", "locked", 0)),
            })
            .await
            .unwrap();
        drop(event_tx);

        assert_eq!(
            msg_rx.recv().await,
            Some(Message::ConnectionChanged(ConnectionState::Connected))
        );
        assert!(matches!(
            msg_rx.recv().await,
            Some(Message::EntityChanged { ref entity_id, .. }) if entity_id == "lock.a"
        ));

        task.await.unwrap();
        assert!(msg_rx.recv().await.is_none());
    }
}
