//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Paste(String),
    Resize,
    Tick,
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    // crossterm's poll/read block, so keep them off the async workers.
    tokio::task::spawn_blocking(move || loop {
        // Poll with the tick rate so we can send Tick events even when
        // nothing is happening.
        let has_event = event::poll(tick_rate).unwrap_or(false);
        let app_event = if has_event {
            match event::read() {
                Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                Ok(CtEvent::Paste(text)) => AppEvent::Paste(text),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!("terminal read failed: {err}");
                    continue;
                }
            }
        } else {
            AppEvent::Tick
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}
