// SPDX-License-Identifier: MIT OR Apache-2.0
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Opaque handle to an element of the host's element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Containment queries against the host's element tree.
pub trait ElementTree {
    /// Returns if `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;
}

/// A minimal element tree that only records parent links.
///
/// Hosts without a tree of their own (and tests) can allocate elements here.
#[derive(Debug, Default)]
pub struct ElementArena {
    parents: RefCell<HashMap<ElementId, Option<ElementId>>>,
    next: Cell<u64>,
}

impl ElementArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an element without a parent.
    pub fn create_root(&self) -> ElementId {
        self.allocate(None)
    }

    /// Allocate an element below `parent`.
    pub fn create_child(&self, parent: ElementId) -> ElementId {
        self.allocate(Some(parent))
    }

    /// Returns the parent of an element, if it has one.
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.parents.borrow().get(&element).copied().flatten()
    }

    /// Returns the number of allocated elements.
    pub fn len(&self) -> usize {
        self.parents.borrow().len()
    }

    /// Returns if no element was allocated yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn allocate(&self, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.next.get());
        self.next.set(id.0 + 1);
        self.parents.borrow_mut().insert(id, parent);
        id
    }
}

impl ElementTree for ElementArena {
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let parents = self.parents.borrow();
        let mut current = Some(node);

        while let Some(element) = current {
            if element == ancestor {
                return true;
            }
            current = parents.get(&element).copied().flatten();
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_walks_ancestors() {
        let arena = ElementArena::new();
        let root = arena.create_root();
        let child = arena.create_child(root);
        let grandchild = arena.create_child(child);
        let stranger = arena.create_root();

        assert!(arena.contains(root, grandchild));
        assert!(arena.contains(child, child));
        assert!(!arena.contains(grandchild, root));
        assert!(!arena.contains(root, stranger));
        assert_eq!(arena.parent(grandchild), Some(child));
        assert_eq!(arena.len(), 4);
    }
}
