// SPDX-License-Identifier: MIT OR Apache-2.0
use std::rc::Rc;

/// An entry a [KeyManager] can move over.
pub trait KeyTarget {
    /// Disabled entries are skipped.
    fn is_disabled(&self) -> bool;

    /// The text type-ahead matches against.
    fn label(&self) -> String;
}

impl<T: KeyTarget + ?Sized> KeyTarget for Rc<T> {
    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

/// Tracks the active entry of a list and moves it in response to navigation.
///
/// The manager never owns the list. Every move receives the current entries, so
/// the owner is free to add or remove entries between moves.
#[derive(Debug, Clone, Default)]
pub struct KeyManager {
    active: Option<usize>,
    wrap: bool,
}

impl KeyManager {
    /// Create a manager without an active entry.
    pub fn new(wrap: bool) -> Self {
        Self { active: None, wrap }
    }

    /// Index of the active entry.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Set the active entry directly.
    pub fn set_active_index(&mut self, index: Option<usize>) {
        self.active = index;
    }

    /// Returns if moving past either end wraps around.
    pub fn wraps(&self) -> bool {
        self.wrap
    }

    /// Activate the first enabled entry.
    pub fn first<T: KeyTarget>(&mut self, entries: &[T]) -> Option<usize> {
        let found = entries.iter().position(|entry| !entry.is_disabled());
        self.activate(found)
    }

    /// Activate the last enabled entry.
    pub fn last<T: KeyTarget>(&mut self, entries: &[T]) -> Option<usize> {
        let found = entries.iter().rposition(|entry| !entry.is_disabled());
        self.activate(found)
    }

    /// Activate the next enabled entry.
    pub fn next<T: KeyTarget>(&mut self, entries: &[T]) -> Option<usize> {
        match self.current(entries) {
            Some(current) => {
                let found = self.step(entries, current, 1);
                self.activate(found)
            }
            None => self.first(entries),
        }
    }

    /// Activate the previous enabled entry.
    pub fn previous<T: KeyTarget>(&mut self, entries: &[T]) -> Option<usize> {
        match self.current(entries) {
            Some(current) => {
                let found = self.step(entries, current, -1);
                self.activate(found)
            }
            None => self.last(entries),
        }
    }

    /// Activate the first enabled entry after the active one whose label starts with
    /// `prefix`, ignoring case. The search wraps and ends on the active entry.
    pub fn find_by_prefix<T: KeyTarget>(&mut self, entries: &[T], prefix: &str) -> Option<usize> {
        let len = entries.len();
        if len == 0 || prefix.is_empty() {
            return None;
        }

        let prefix = prefix.to_lowercase();
        let base = self.current(entries).map_or(len - 1, |current| current);

        let found = (1..=len)
            .map(|offset| (base + offset) % len)
            .find(|&index| {
                let entry = &entries[index];
                !entry.is_disabled() && entry.label().to_lowercase().starts_with(&prefix)
            });

        self.activate(found)
    }

    fn current<T>(&self, entries: &[T]) -> Option<usize> {
        self.active.filter(|&index| index < entries.len())
    }

    fn step<T: KeyTarget>(&self, entries: &[T], from: usize, delta: isize) -> Option<usize> {
        let len = entries.len() as isize;
        let mut index = from as isize;

        for _ in 1..len {
            index += delta;
            if self.wrap {
                index = index.rem_euclid(len);
            } else if index < 0 || index >= len {
                return None;
            }

            if !entries[index as usize].is_disabled() {
                return Some(index as usize);
            }
        }

        None
    }

    fn activate(&mut self, found: Option<usize>) -> Option<usize> {
        if found.is_some() {
            self.active = found;
        }
        found
    }
}
