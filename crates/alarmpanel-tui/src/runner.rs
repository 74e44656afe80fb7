//! Main TUI runner: terminal lifecycle and the event loop

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use alarmpanel_app::{
    process_message, spawn_event_forwarder, spawn_signal_handler, AppState, CommandDispatcher,
    HassDispatcher, Message,
};
use alarmpanel_core::prelude::*;
use alarmpanel_hass::HassClient;

use crate::{event, render, terminal};

/// Input poll interval (20 FPS)
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the panel until the user quits or a signal arrives.
pub async fn run(mut state: AppState, client: HassClient) -> Result<()> {
    let mut term = terminal::enter();

    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
    let signals = spawn_signal_handler(msg_tx.clone());

    let (handle, event_rx) = client.into_parts();
    let forwarder = spawn_event_forwarder(event_rx, msg_tx);
    let dispatcher = HassDispatcher::new(handle.clone());

    let tick = Duration::from_millis(state.ui.tick_ms);
    let result = run_loop(&mut term, &mut state, msg_rx, &dispatcher, tick);

    handle.disconnect().await;
    forwarder.abort();
    signals.abort();
    terminal::leave();

    info!("Alarm panel stopped");
    result
}

fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    dispatcher: &dyn CommandDispatcher,
    tick: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    while !state.should_quit() {
        // Home Assistant events and signals
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, dispatcher);
        }

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll(POLL_INTERVAL)? {
            process_message(state, message, dispatcher);
        }

        // Ages ("5m ago") drift without new events
        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            process_message(state, Message::Tick, dispatcher);
        }
    }

    Ok(())
}
