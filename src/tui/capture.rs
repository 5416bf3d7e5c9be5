//! # Input Capture
//!
//! The concurrent half of the game: a tokio task that reads terminal key
//! events for the session's lifetime and applies them to the shared
//! [`InputBuffer`]. Digits append, backspace pops, everything else is
//! ignored.
//!
//! A plain blocking read could only be stopped by killing the task, so
//! each iteration instead selects between the next event and a
//! [`CancellationToken`]; the orchestrator cancels and then awaits the
//! join handle for a confirmed, clean stop before restoring the terminal.
//! The buffer lock is only taken after an event has arrived, never across
//! the await.

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures::StreamExt;
use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::input::InputBuffer;

pub fn spawn(buffer: InputBuffer, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(capture_loop(buffer, cancel))
}

async fn capture_loop(buffer: InputBuffer, cancel: CancellationToken) {
    let mut events = EventStream::new();
    debug!("input capture running");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    apply_key(&buffer, key.code);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => warn!("terminal event error: {e}"),
                None => break,
            },
        }
    }
    debug!("input capture stopped");
}

fn apply_key(buffer: &InputBuffer, code: KeyCode) {
    match code {
        KeyCode::Char(c) if c.is_ascii_digit() => buffer.push_digit(c),
        KeyCode::Backspace => buffer.backspace(),
        _ => {}
    }
}
