// SPDX-License-Identifier: MIT OR Apache-2.0
use std::time::{Duration, Instant};

/// Collects typed characters into a prefix until typing pauses.
#[derive(Debug, Clone)]
pub struct TypeAhead {
    buffer: String,
    deadline: Option<Instant>,
    debounce: Duration,
}

impl TypeAhead {
    /// Create an empty buffer with the given debounce interval.
    pub fn new(debounce: Duration) -> Self {
        Self {
            buffer: String::new(),
            deadline: None,
            debounce,
        }
    }

    /// Append a character typed at `now`.
    ///
    /// If the previous prefix had already settled, it is returned so the caller can
    /// apply it before the new character starts a fresh prefix.
    pub fn push(&mut self, c: char, now: Instant) -> Option<String> {
        let settled = self.take_ready(now);
        self.buffer.extend(c.to_lowercase());
        self.deadline = Some(now + self.debounce);
        settled
    }

    /// Take the prefix if typing paused for at least the debounce interval.
    pub fn take_ready(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline && !self.buffer.is_empty() => {
                self.deadline = None;
                Some(std::mem::take(&mut self.buffer))
            }
            _ => None,
        }
    }

    /// Returns if characters are waiting for the debounce to elapse.
    pub fn is_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// The characters typed so far, lowercased.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Drop any pending characters.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.deadline = None;
    }
}
