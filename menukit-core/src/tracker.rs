// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::element::{ElementId, ElementTree};
use crate::stack::MenuStack;

/// The set of elements that currently make up an open menu tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenMenuTracker {
    open_menus: Vec<ElementId>,
}

impl OpenMenuTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track the root element plus every element on the stack.
    pub fn from_stack(root: Option<ElementId>, stack: &MenuStack) -> Self {
        let mut tracker = Self::new();
        if let Some(root) = root {
            tracker.push(root);
        }
        tracker.extend(stack.items().iter().filter_map(|item| item.element()));
        tracker
    }

    /// Track an element.
    pub fn push(&mut self, element: ElementId) {
        self.open_menus.push(element);
    }

    /// Track several elements.
    pub fn extend(&mut self, elements: impl IntoIterator<Item = ElementId>) {
        self.open_menus.extend(elements);
    }

    /// Returns if `target` lies inside any tracked element.
    pub fn contains(&self, tree: &dyn ElementTree, target: ElementId) -> bool {
        self.open_menus
            .iter()
            .any(|menu| tree.contains(*menu, target))
    }

    /// The tracked elements, in insertion order.
    pub fn elements(&self) -> &[ElementId] {
        &self.open_menus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Orientation;
    use crate::element::ElementArena;
    use crate::id::MenuId;
    use crate::stack::MenuStackItem;

    #[test]
    fn test_tracks_root_and_stacked_menus() {
        let arena = ElementArena::new();
        let bar = arena.create_root();
        let bar_item = arena.create_child(bar);
        let popup = arena.create_root();
        let popup_item = arena.create_child(popup);
        let outside = arena.create_root();

        let stack = MenuStack::new();
        stack.push(MenuStackItem::new(MenuId(1), Some(popup), Orientation::Vertical));

        let tracker = OpenMenuTracker::from_stack(Some(bar), &stack);

        assert_eq!(tracker.elements(), &[bar, popup]);
        assert!(tracker.contains(&arena, bar_item));
        assert!(tracker.contains(&arena, popup_item));
        assert!(!tracker.contains(&arena, outside));
    }
}
