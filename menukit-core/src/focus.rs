// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::id::ItemId;
use std::cell::RefCell;
use std::rc::Rc;

/// How focus reached an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusOrigin {
    /// Arrow keys, type-ahead, Home/End or Tab.
    Keyboard,
    /// Pointer hover or click.
    Mouse,
    /// Set by application code.
    #[default]
    Program,
}

/// Focus state for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// Item is not focused.
    None,
    /// Item has focus.
    Focused,
    /// Item had focus but lost it since the last settle.
    Lost,
    /// Item gained focus since the last settle.
    Gained,
}

/// Application-wide record of which menu item holds focus.
#[derive(Debug, Default)]
pub struct FocusManager {
    focused: Option<ItemId>,
    previous: Option<ItemId>,
    origin: FocusOrigin,
    moves: u64,
}

/// A focus manager shared by every menu of an application.
pub type SharedFocusManager = Rc<RefCell<FocusManager>>;

impl FocusManager {
    /// Create a new focus manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new focus manager ready to be shared.
    pub fn shared() -> SharedFocusManager {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Move focus to an item.
    pub fn set_focus(&mut self, item: ItemId, origin: FocusOrigin) {
        if self.focused != Some(item) {
            log::trace!("Focus moved to {} via {:?}", item, origin);
            self.moves += 1;
        }
        self.focused = Some(item);
        self.origin = origin;
    }

    /// Clear focus.
    pub fn clear_focus(&mut self) {
        if self.focused.take().is_some() {
            self.moves += 1;
        }
    }

    /// Number of times focus moved to a different item or was cleared.
    ///
    /// Hosts compare it between frames to find out if anything needs repainting.
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// The currently focused item.
    pub fn focused(&self) -> Option<ItemId> {
        self.focused
    }

    /// The item that was focused at the last settle.
    pub fn previous(&self) -> Option<ItemId> {
        self.previous
    }

    /// How the last focus change happened.
    pub fn origin(&self) -> FocusOrigin {
        self.origin
    }

    /// Check if the last focus change was via keyboard.
    pub fn was_last_focus_via_keyboard(&self) -> bool {
        self.origin == FocusOrigin::Keyboard
    }

    /// Check if an item is focused.
    pub fn is_focused(&self, item: ItemId) -> bool {
        self.focused == Some(item)
    }

    /// Get the current focus state for an item.
    pub fn focus_state(&self, item: ItemId) -> FocusState {
        let is_focused = self.focused == Some(item);
        let was_focused = self.previous == Some(item);

        match (was_focused, is_focused) {
            (false, true) => FocusState::Gained,
            (true, false) => FocusState::Lost,
            (true, true) => FocusState::Focused,
            (false, false) => FocusState::None,
        }
    }

    /// Record the current focus as settled. Call once per host frame.
    pub fn settle(&mut self) {
        self.previous = self.focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_state_transitions() {
        let mut focus = FocusManager::new();
        let a = ItemId(1);
        let b = ItemId(2);

        focus.set_focus(a, FocusOrigin::Keyboard);
        assert_eq!(focus.focus_state(a), FocusState::Gained);
        assert!(focus.was_last_focus_via_keyboard());

        focus.settle();
        assert_eq!(focus.focus_state(a), FocusState::Focused);

        focus.set_focus(b, FocusOrigin::Mouse);
        assert_eq!(focus.focus_state(a), FocusState::Lost);
        assert_eq!(focus.focus_state(b), FocusState::Gained);
        assert_eq!(focus.previous(), Some(a));
        assert!(!focus.was_last_focus_via_keyboard());
    }

    #[test]
    fn test_moves_count_changes_only() {
        let mut focus = FocusManager::new();

        focus.set_focus(ItemId(1), FocusOrigin::Keyboard);
        focus.set_focus(ItemId(1), FocusOrigin::Mouse);
        assert_eq!(focus.moves(), 1);

        focus.set_focus(ItemId(2), FocusOrigin::Mouse);
        focus.clear_focus();
        focus.clear_focus();
        assert_eq!(focus.moves(), 3);
    }
}
