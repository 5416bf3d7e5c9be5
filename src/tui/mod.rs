//! # TUI Adapter
//!
//! The ratatui-specific layer: terminal lifecycle, the frame-paced game
//! loop, and the input capture task. This is the only module tree that
//! knows about ratatui and crossterm; game rules live in `core`.
//!
//! One session is two concurrent tasks sharing the locked input buffer:
//! this loop (tick, layout, draw, short sleep; never blocking on keys)
//! and [`capture`] (awaiting key events). At game end the loop cancels
//! capture and awaits its join handle before the terminal is restored, so
//! the device is released deterministically. There is no timeout on that
//! await: a capture task that never stops would stall shutdown, which is
//! preferred to orphaning a task that still owns terminal input.

pub mod capture;
pub mod layout;
mod ui;

use std::convert::Infallible;
use std::fmt;
use std::io;
use std::time::Duration;

use log::{info, warn};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio_util::sync::CancellationToken;

use crate::core::config::GameConfig;
use crate::core::input::InputBuffer;
use crate::core::rng::GameRng;
use crate::core::session::Session;

/// ~30 fps. Paces rendering; input is captured concurrently.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

#[derive(Debug)]
pub enum SessionError {
    Io(io::Error),
    Layout(layout::LayoutError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "terminal I/O error: {e}"),
            SessionError::Layout(e) => write!(f, "render error: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        SessionError::Io(e)
    }
}

impl From<layout::LayoutError> for SessionError {
    fn from(e: layout::LayoutError) -> Self {
        SessionError::Layout(e)
    }
}

impl From<Infallible> for SessionError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

/// Play one full game on the real terminal and return the final score.
///
/// INIT: build the session, render once, launch input capture.
/// RUNNING: [`drive`]. ENDED: cancel capture, await its confirmed stop,
/// restore the terminal.
pub async fn run(config: GameConfig) -> Result<u32, SessionError> {
    let buffer = InputBuffer::new();
    let mut session = Session::new(config, GameRng::from_entropy(), buffer.clone());

    let mut terminal = ratatui::init();
    let outcome = match draw_frame(&mut terminal, &session) {
        Ok(()) => {
            let cancel = CancellationToken::new();
            let capture = capture::spawn(buffer, cancel.clone());
            let played = drive(&mut terminal, &mut session).await;
            cancel.cancel();
            if let Err(e) = capture.await {
                warn!("input capture task failed: {e}");
            }
            played
        }
        Err(e) => Err(e),
    };
    ratatui::restore();

    outcome.map(|()| session.score)
}

/// The RUNNING loop: tick and render every frame while time remains.
/// Public so the integration tests can drive a session on a
/// `TestBackend` with scripted buffer input.
pub async fn drive<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
) -> Result<(), SessionError>
where
    SessionError: From<B::Error>,
{
    while !session.is_over() {
        session.tick();
        draw_frame(terminal, session)?;
        tokio::time::sleep(FRAME_INTERVAL).await;
    }
    info!("session over: score {}", session.score);
    Ok(())
}

pub fn draw_frame<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &Session,
) -> Result<(), SessionError>
where
    SessionError: From<B::Error>,
{
    let typed = session.buffer.snapshot();
    let debug_line = session.config().debug.then(|| format!("buffer: {typed:?}"));
    let frame_layout = layout::compute(
        terminal.size()?,
        session.remaining_secs,
        session.score,
        &session.equation.display,
        &typed,
        debug_line.as_deref(),
    )?;
    terminal.draw(|frame| ui::render(frame, &frame_layout))?;
    Ok(())
}
