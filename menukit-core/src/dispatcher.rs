// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::emitter::{Emitter, Subscription};
use std::fmt;

/// Broadcasts `(id, name)` selections between the radio items of one group.
///
/// Notifications are synchronous and reach every listener, including the one
/// belonging to the notifier. Clones share listeners.
#[derive(Clone)]
pub struct SelectionDispatcher {
    listeners: Emitter<(String, String)>,
}

impl SelectionDispatcher {
    /// Create a dispatcher without listeners.
    pub fn new() -> Self {
        Self {
            listeners: Emitter::new(),
        }
    }

    /// Register a selection listener.
    pub fn listen(&self, listener: impl Fn(&str, &str) + 'static) -> Subscription {
        self.listeners
            .subscribe(move |(id, name)| listener(id.as_str(), name.as_str()))
    }

    /// Announce that the item `id` of the radio group `name` was selected.
    pub fn notify(&self, id: &str, name: &str) {
        log::trace!("Radio selection {} in group {}", id, name);
        self.listeners.emit(&(id.to_string(), name.to_string()));
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.listener_count()
    }
}

impl Default for SelectionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SelectionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionDispatcher")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
