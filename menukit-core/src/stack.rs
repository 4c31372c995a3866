// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::direction::Orientation;
use crate::element::ElementId;
use crate::emitter::{Emitter, Subscription};
use crate::error::{MenuError, MenuResult};
use crate::id::MenuId;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// What should receive focus once a close has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusNext {
    /// Leave focus alone.
    #[default]
    None,
    /// Refocus the item that owned the closed menu.
    CurrentItem,
    /// Move the root container to its next item.
    NextItem,
    /// Move the root container to its previous item.
    PreviousItem,
}

/// A menu as seen by the [MenuStack].
///
/// Two stack items are equal when they refer to the same menu.
#[derive(Debug, Clone, Copy)]
pub struct MenuStackItem {
    menu: MenuId,
    element: Option<ElementId>,
    orientation: Orientation,
}

impl MenuStackItem {
    /// Create a stack item.
    pub fn new(menu: MenuId, element: Option<ElementId>, orientation: Orientation) -> Self {
        Self {
            menu,
            element,
            orientation,
        }
    }

    /// The menu this item stands for.
    pub fn menu(&self) -> MenuId {
        self.menu
    }

    /// The host element of the menu, used for containment checks.
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    /// The menu's orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl PartialEq for MenuStackItem {
    fn eq(&self, other: &Self) -> bool {
        self.menu == other.menu
    }
}

impl Eq for MenuStackItem {}

impl Hash for MenuStackItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.menu.hash(state);
    }
}

enum StackEvent {
    Closed(MenuStackItem),
    Emptied(FocusNext),
}

struct StackState {
    items: RefCell<Vec<MenuStackItem>>,
    closed: Emitter<MenuStackItem>,
    emptied: Emitter<FocusNext>,
    pending: RefCell<VecDeque<StackEvent>>,
    dispatching: Cell<bool>,
}

/// The ordered list of open menus of one menu tree, bottom first.
///
/// Every mutation finishes before any event is delivered. Events caused by a
/// listener are queued and delivered after the events already in flight, so
/// observers always see them in the order the mutations happened.
///
/// Clones share the same stack. Equality is identity.
#[derive(Clone)]
pub struct MenuStack {
    state: Rc<StackState>,
}

impl MenuStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            state: Rc::new(StackState {
                items: RefCell::new(Vec::new()),
                closed: Emitter::new(),
                emptied: Emitter::new(),
                pending: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
            }),
        }
    }

    /// Push an item on top. Returns `false` if the item already was on the stack.
    pub fn push(&self, item: MenuStackItem) -> bool {
        match self.try_push(item) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("{}", err);
                false
            }
        }
    }

    /// Push an item on top, failing if the item already was on the stack.
    pub fn try_push(&self, item: MenuStackItem) -> MenuResult<()> {
        let mut items = self.state.items.borrow_mut();
        if items.contains(&item) {
            return Err(MenuError::DuplicateStackItem { menu: item.menu });
        }
        items.push(item);
        log::debug!("Pushed {} onto menu stack (depth {})", item.menu, items.len());
        Ok(())
    }

    /// Remove `item` and everything above it.
    ///
    /// Emits `closed` for each removed item from the top down, then `emptied` if
    /// nothing is left. Does nothing if `item` is not on the stack.
    pub fn close(&self, item: &MenuStackItem, focus_next: FocusNext) {
        let removed = {
            let mut items = self.state.items.borrow_mut();
            let Some(position) = items.iter().position(|open| open == item) else {
                log::trace!("Ignoring close of {}, it is not on the menu stack", item.menu);
                return;
            };
            items.split_off(position)
        };

        log::debug!("Closing {} menu(s) from {}", removed.len(), item.menu);
        self.enqueue_closed(removed);
        if self.is_empty() {
            self.enqueue(StackEvent::Emptied(focus_next));
        }
        self.dispatch();
    }

    /// Remove every item above `item`, keeping `item` itself.
    pub fn close_sub_menu_of(&self, item: &MenuStackItem) {
        let removed = {
            let mut items = self.state.items.borrow_mut();
            let Some(position) = items.iter().position(|open| open == item) else {
                return;
            };
            items.split_off(position + 1)
        };

        if removed.is_empty() {
            return;
        }
        self.enqueue_closed(removed);
        self.dispatch();
    }

    /// Remove every item. Emits `emptied` exactly once if anything was removed.
    pub fn close_all(&self, focus_next: FocusNext) {
        let removed = std::mem::take(&mut *self.state.items.borrow_mut());
        if removed.is_empty() {
            return;
        }

        log::debug!("Closing all {} open menu(s)", removed.len());
        self.enqueue_closed(removed);
        self.enqueue(StackEvent::Emptied(focus_next));
        self.dispatch();
    }

    /// The top item.
    pub fn peek(&self) -> Option<MenuStackItem> {
        self.state.items.borrow().last().copied()
    }

    /// Number of open menus.
    pub fn len(&self) -> usize {
        self.state.items.borrow().len()
    }

    /// Returns if no menu is open.
    pub fn is_empty(&self) -> bool {
        self.state.items.borrow().is_empty()
    }

    /// Returns if `item` is on the stack.
    pub fn contains(&self, item: &MenuStackItem) -> bool {
        self.state.items.borrow().contains(item)
    }

    /// A copy of the items, bottom first.
    pub fn items(&self) -> Vec<MenuStackItem> {
        self.state.items.borrow().clone()
    }

    /// Observe removed items.
    pub fn subscribe_closed(&self, listener: impl Fn(&MenuStackItem) + 'static) -> Subscription {
        self.state.closed.subscribe(listener)
    }

    /// Observe the stack becoming empty.
    pub fn subscribe_emptied(&self, listener: impl Fn(&FocusNext) + 'static) -> Subscription {
        self.state.emptied.subscribe(listener)
    }

    /// Returns if both handles refer to the same stack.
    pub fn ptr_eq(&self, other: &MenuStack) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    fn enqueue_closed(&self, removed: Vec<MenuStackItem>) {
        let mut pending = self.state.pending.borrow_mut();
        pending.extend(removed.into_iter().rev().map(StackEvent::Closed));
    }

    fn enqueue(&self, event: StackEvent) {
        self.state.pending.borrow_mut().push_back(event);
    }

    fn dispatch(&self) {
        if self.state.dispatching.replace(true) {
            return;
        }
        let _guard = DispatchGuard(&self.state.dispatching);

        loop {
            let next = self.state.pending.borrow_mut().pop_front();
            match next {
                Some(StackEvent::Closed(item)) => self.state.closed.emit(&item),
                Some(StackEvent::Emptied(focus_next)) => self.state.emptied.emit(&focus_next),
                None => break,
            }
        }
    }
}

struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Default for MenuStack {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for MenuStack {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for MenuStack {}

impl fmt::Debug for MenuStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuStack")
            .field("items", &*self.state.items.borrow())
            .finish()
    }
}
