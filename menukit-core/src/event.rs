// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::element::ElementId;
use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 1 << 0;
        /// Control key.
        const CONTROL = 1 << 1;
        /// Alt/Option key.
        const ALT = 1 << 2;
        /// Meta/Super/Command key.
        const META = 1 << 3;
    }
}

/// Keys the menu containers react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Enter/Return.
    Enter,
    /// Space bar.
    Space,
    /// A character key.
    Character(char),
    /// Any key menus ignore.
    Other,
}

/// A key press delivered to a menu container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The pressed key.
    pub key: Key,
    /// Modifiers held during the press.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event without modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// Create a key event with the given modifiers.
    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Returns if any modifier is held.
    pub fn has_modifier(&self) -> bool {
        !self.modifiers.is_empty()
    }

    /// Returns the character this event contributes to type-ahead, if any.
    ///
    /// Only letters and digits count, and only without command modifiers.
    pub fn type_ahead_char(&self) -> Option<char> {
        let Key::Character(c) = self.key else {
            return None;
        };

        if self
            .modifiers
            .intersects(Modifiers::CONTROL | Modifiers::ALT | Modifiers::META)
        {
            return None;
        }

        c.is_alphanumeric().then_some(c)
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// Result of offering a key event to a menu container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHandling {
    /// The menu consumed the event.
    Handled,
    /// The host should continue its default handling.
    Propagate,
}

impl KeyHandling {
    /// Returns if the event was consumed.
    pub fn is_handled(&self) -> bool {
        matches!(self, KeyHandling::Handled)
    }
}

/// A pointer-down event seen by the host, anywhere in the application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointerEvent {
    /// The element the event was dispatched to, after any retargeting.
    pub target: Option<ElementId>,
    /// The composed path, innermost element first. Empty if unknown.
    pub composed_path: Vec<ElementId>,
}

impl PointerEvent {
    /// Create an event for a plain target.
    pub fn new(target: ElementId) -> Self {
        Self {
            target: Some(target),
            composed_path: Vec::new(),
        }
    }

    /// Create an event whose target was retargeted, e.g. out of a shadow tree.
    pub fn retargeted(target: ElementId, composed_path: Vec<ElementId>) -> Self {
        Self {
            target: Some(target),
            composed_path,
        }
    }

    /// The element the pointer actually went down on.
    pub fn origin(&self) -> Option<ElementId> {
        self.composed_path.first().copied().or(self.target)
    }
}
