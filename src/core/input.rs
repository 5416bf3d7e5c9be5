//! # Shared Input Buffer
//!
//! The digit buffer shared between the input capture task and the game
//! loop. Every access goes through one of the named critical sections
//! below; the lock is never held across an await or a terminal read.
//!
//! The buffer, whenever the lock is released, holds exactly the digits
//! typed since the last correct match (or game start), oldest first.

use std::sync::{Arc, Mutex, MutexGuard};

/// Cloning yields another handle to the same underlying buffer.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    digits: Arc<Mutex<Vec<char>>>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<char>> {
        self.digits.lock().expect("input buffer lock poisoned")
    }

    /// Critical section: append one typed digit.
    pub fn push_digit(&self, c: char) {
        debug_assert!(c.is_ascii_digit());
        self.lock().push(c);
    }

    /// Critical section: drop the most recent digit. No-op when empty.
    pub fn backspace(&self) {
        self.lock().pop();
    }

    /// Critical section: compare the joined digits against `expected` and,
    /// on a match, clear the buffer. Comparison and clear happen under a
    /// single lock acquisition so a concurrent keystroke can never land
    /// between them.
    pub fn take_if_matches(&self, expected: &str) -> bool {
        let mut digits = self.lock();
        if digits.len() == expected.len() && digits.iter().copied().eq(expected.chars()) {
            digits.clear();
            true
        } else {
            false
        }
    }

    /// Critical section: the current contents as a string, for rendering.
    pub fn snapshot(&self) -> String {
        self.lock().iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
