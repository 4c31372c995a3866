// SPDX-License-Identifier: MIT OR Apache-2.0
use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct EmitterInner<T> {
    listeners: RefCell<IndexMap<u64, Listener<T>>>,
    next_id: Cell<u64>,
    closed: Cell<bool>,
}

/// A single-threaded event stream.
///
/// Listeners are called in subscription order. Emitting works on a snapshot of the
/// listener list, so listeners may subscribe, unsubscribe or emit again while being
/// called. A listener removed during an emission is not called for the rest of it.
pub struct Emitter<T: 'static> {
    inner: Rc<EmitterInner<T>>,
}

impl<T: 'static> Emitter<T> {
    /// Create a new, open emitter without listeners.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(EmitterInner {
                listeners: RefCell::new(IndexMap::new()),
                next_id: Cell::new(0),
                closed: Cell::new(false),
            }),
        }
    }

    /// Register a listener. The listener stays registered until the returned
    /// [Subscription] is dropped or unsubscribed.
    ///
    /// Subscribing to a closed emitter returns an inert subscription.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        if self.inner.closed.get() {
            return Subscription::empty();
        }

        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .insert(id, Rc::new(listener));

        let weak: Weak<EmitterInner<T>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.borrow_mut().shift_remove(&id);
            }
        })
    }

    /// Deliver a value to every current listener.
    pub fn emit(&self, value: &T) {
        if self.inner.closed.get() {
            return;
        }

        let snapshot: Vec<(u64, Listener<T>)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, listener.clone()))
            .collect();

        for (id, listener) in snapshot {
            if !self.inner.listeners.borrow().contains_key(&id) {
                continue;
            }
            listener(value);
        }
    }

    /// Permanently stop this emitter. Current listeners are dropped and later
    /// emissions and subscriptions are ignored.
    pub fn close(&self) {
        self.inner.closed.set(true);
        let dropped = std::mem::take(&mut *self.inner.listeners.borrow_mut());
        drop(dropped);
    }

    /// Returns if [Emitter::close] was called.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl<T: 'static> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listener_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a subscription that runs `release` once when it ends.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Create a subscription that does nothing when dropped.
    pub fn empty() -> Self {
        Self { release: None }
    }

    /// Unsubscribe now.
    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    /// Keep the listener registered for as long as its emitter lives.
    pub fn detach(mut self) {
        self.release = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
