//! SIGINT/SIGTERM → [`Message::Quit`]

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use alarmpanel_core::prelude::*;

use crate::message::Message;

/// Quit the panel on the first termination signal.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match termination_signal().await {
            Ok(name) => {
                info!("{} received, shutting down", name);
                if tx.send(Message::Quit).await.is_err() {
                    debug!("Event loop already gone");
                }
            }
            Err(e) => error!("Signal handler error: {}", e),
        }
    })
}

#[cfg(unix)]
async fn termination_signal() -> Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let listen = |kind: SignalKind, name: &str| {
        signal(kind).map_err(|e| Error::terminal(format!("Cannot listen for {name}: {e}")))
    };
    let mut interrupt = listen(SignalKind::interrupt(), "SIGINT")?;
    let mut terminate = listen(SignalKind::terminate(), "SIGTERM")?;

    Ok(tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
    })
}

#[cfg(not(unix))]
async fn termination_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::terminal(format!("Cannot listen for Ctrl+C: {e}")))?;
    Ok("Ctrl+C")
}
