// SPDX-License-Identifier: MIT OR Apache-2.0
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Unique identifier for a menu container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(pub u64);

/// Unique identifier for a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "menu#{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

const SELECTABLE_PREFIX: &str = "menu-item-radio";

#[derive(Debug, Default)]
struct Counters {
    menu: Cell<u64>,
    item: Cell<u64>,
    selectable_name: Cell<u64>,
    selectable_id: Cell<u64>,
}

/// Generates ids for the lifetime of one application (or one test).
///
/// Clones share the same counters, so every component created from one environment
/// draws from the same sequence. [IdGenerator::reset] restarts all sequences.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    counters: Rc<Counters>,
}

impl IdGenerator {
    /// Create a generator with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the next menu id.
    pub fn next_menu_id(&self) -> MenuId {
        MenuId(bump(&self.counters.menu))
    }

    /// Get the next item id.
    pub fn next_item_id(&self) -> ItemId {
        ItemId(bump(&self.counters.item))
    }

    /// Get the next default `name` for a selectable item.
    pub fn next_selectable_name(&self) -> String {
        format!("{}-{}", SELECTABLE_PREFIX, bump(&self.counters.selectable_name))
    }

    /// Get the next default `id` for a selectable item.
    pub fn next_selectable_id(&self) -> String {
        format!("{}-{}", SELECTABLE_PREFIX, bump(&self.counters.selectable_id))
    }

    /// Restart every sequence from zero.
    pub fn reset(&self) {
        self.counters.menu.set(0);
        self.counters.item.set(0);
        self.counters.selectable_name.set(0);
        self.counters.selectable_id.set(0);
    }
}

fn bump(counter: &Cell<u64>) -> u64 {
    let value = counter.get();
    counter.set(value + 1);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_sequences() {
        let ids = IdGenerator::new();
        let other = ids.clone();

        assert_eq!(ids.next_item_id(), ItemId(0));
        assert_eq!(other.next_item_id(), ItemId(1));
        assert_eq!(ids.next_menu_id(), MenuId(0));
    }

    #[test]
    fn test_selectable_names_and_ids_count_independently() {
        let ids = IdGenerator::new();

        assert_eq!(ids.next_selectable_name(), "menu-item-radio-0");
        assert_eq!(ids.next_selectable_name(), "menu-item-radio-1");
        assert_eq!(ids.next_selectable_id(), "menu-item-radio-0");
    }

    #[test]
    fn test_reset_restarts_sequences() {
        let ids = IdGenerator::new();
        ids.next_item_id();
        ids.next_selectable_id();

        ids.reset();

        assert_eq!(ids.next_item_id(), ItemId(0));
        assert_eq!(ids.next_selectable_id(), "menu-item-radio-0");
    }
}
