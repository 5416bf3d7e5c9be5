//! # Game Session
//!
//! Core session state and its transitions: INIT (construction) → RUNNING
//! (`tick` per frame while time remains) → ENDED (`is_over`). All state
//! here is mutated exclusively by the loop that owns the session; the
//! input capture task only ever touches the shared [`InputBuffer`].
//!
//! Remaining time is derived each tick from a monotonic start instant
//! (`duration - floor(elapsed)`), never decremented by a timer. Floor
//! matters: the countdown shows the same second for up to a full second
//! before dropping.

use log::{debug, info};
use tokio::time::Instant;

use crate::core::config::GameConfig;
use crate::core::equation::Equation;
use crate::core::input::InputBuffer;
use crate::core::rng::GameRng;

pub struct Session {
    config: GameConfig,
    rng: GameRng,
    /// Shared with the input capture task.
    pub buffer: InputBuffer,
    pub equation: Equation,
    pub score: u32,
    /// Non-positive once the clock has run out.
    pub remaining_secs: i64,
    started_at: Instant,
}

impl Session {
    /// INIT: record the start instant and draw the first equation.
    pub fn new(config: GameConfig, mut rng: GameRng, buffer: InputBuffer) -> Self {
        let equation = Equation::generate(&config, &mut rng);
        info!(
            "session start: {}s, operators {:?}",
            config.duration_secs, config.operators
        );
        Self {
            remaining_secs: config.duration_secs as i64,
            started_at: Instant::now(),
            config,
            rng,
            buffer,
            equation,
            score: 0,
        }
    }

    /// One RUNNING iteration: compare-and-score, then recompute the
    /// countdown. Returns true when the current equation was solved.
    pub fn tick(&mut self) -> bool {
        let solved = self.buffer.take_if_matches(&self.equation.answer());
        if solved {
            self.score += 1;
            self.equation = Equation::generate(&self.config, &mut self.rng);
            debug!("solved, score {}, next: {}", self.score, self.equation.display);
        }
        self.remaining_secs =
            self.config.duration_secs as i64 - self.started_at.elapsed().as_secs() as i64;
        solved
    }

    /// ENDED once the countdown is non-positive. Checked at the top of
    /// each loop iteration, so the frame that shows 0 is still drawn.
    pub fn is_over(&self) -> bool {
        self.remaining_secs <= 0
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
