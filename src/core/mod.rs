//! # Core Game Logic
//!
//! UI-free game logic. Nothing in here knows about ratatui or crossterm;
//! the `tui` module adapts it to a real terminal.
//!
//! - [`config`]: layered configuration and constraint validation
//! - [`rng`]: seedable random generator for equation drawing
//! - [`equation`]: operators, random triples, display strings
//! - [`input`]: the lock-guarded digit buffer shared with input capture
//! - [`session`]: game state and the INIT → RUNNING → ENDED transitions

pub mod config;
pub mod equation;
pub mod input;
pub mod rng;
pub mod session;
