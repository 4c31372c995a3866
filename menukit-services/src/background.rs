// SPDX-License-Identifier: MIT OR Apache-2.0
use menukit_core::element::{ElementId, ElementTree};
use menukit_core::emitter::Subscription;
use menukit_core::event::PointerEvent;
use menukit_core::stack::{FocusNext, MenuStack};
use menukit_core::tracker::OpenMenuTracker;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Decides if a pointer-down on an element should close the tracked menus.
pub type ShouldCloseMenu = Rc<dyn Fn(ElementId) -> bool>;

#[derive(Default)]
struct ListenerState {
    should_close: Option<ShouldCloseMenu>,
    stack: Option<MenuStack>,
    emptied: Option<Subscription>,
}

/// Closes the open menu tree when the user presses the pointer outside of it.
///
/// At most one stack is tracked per service. Starting to track another stack closes
/// every menu of the previous one. Tracking ends by itself once the stack empties.
///
/// Clones share one listener. Dropping the last clone releases the stack
/// subscription the same way [BackgroundCloseService::dispose] does.
#[derive(Clone, Default)]
pub struct BackgroundCloseService {
    state: Rc<RefCell<ListenerState>>,
}

impl BackgroundCloseService {
    /// Create an idle service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `stack`, closing it on background clicks that `should_close` accepts.
    ///
    /// Calling this again for the stack already tracked does nothing.
    pub fn start_listener(&self, should_close: ShouldCloseMenu, stack: &MenuStack) {
        if self.is_tracking(stack) {
            return;
        }

        self.close_previous_listener();

        let weak = Rc::downgrade(&self.state);
        let emptied = stack.subscribe_emptied(move |_| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            // An earlier emptied listener may already have opened a new menu.
            let still_empty = state
                .borrow()
                .stack
                .as_ref()
                .map_or(true, |stack| stack.is_empty());
            if still_empty {
                log::debug!("Background close listener stopped");
                Self::reset(&state);
            }
        });

        let mut state = self.state.borrow_mut();
        state.should_close = Some(should_close);
        state.stack = Some(stack.clone());
        state.emptied = Some(emptied);
        log::debug!("Background close listener started");
    }

    /// Feed a pointer-down from anywhere in the application.
    ///
    /// Returns `true` if the tracked menus were closed.
    pub fn handle_pointer_down(&self, event: &PointerEvent) -> bool {
        let (should_close, stack) = {
            let state = self.state.borrow();
            match (&state.should_close, &state.stack) {
                (Some(should_close), Some(stack)) => (should_close.clone(), stack.clone()),
                _ => return false,
            }
        };

        let Some(origin) = event.origin() else {
            return false;
        };

        if !should_close(origin) {
            return false;
        }

        log::debug!("Pointer down outside of open menus, closing them");
        stack.close_all(FocusNext::None);
        true
    }

    /// Returns if a stack is tracked.
    pub fn is_listening(&self) -> bool {
        self.state.borrow().stack.is_some()
    }

    /// Returns if `stack` is the tracked stack.
    pub fn is_tracking(&self, stack: &MenuStack) -> bool {
        self.state
            .borrow()
            .stack
            .as_ref()
            .is_some_and(|tracked| tracked.ptr_eq(stack))
    }

    /// Stop tracking without closing anything.
    pub fn dispose(&self) {
        Self::reset(&self.state);
    }

    /// The standard predicate: close unless the target lies inside the root menu
    /// element or any menu on `stack`.
    pub fn default_predicate(
        tree: Rc<dyn ElementTree>,
        root: Option<ElementId>,
        stack: MenuStack,
    ) -> ShouldCloseMenu {
        Rc::new(move |target| {
            !OpenMenuTracker::from_stack(root, &stack).contains(tree.as_ref(), target)
        })
    }

    fn close_previous_listener(&self) {
        let previous = self.state.borrow().stack.clone();
        if let Some(stack) = previous {
            stack.close_all(FocusNext::None);
        }
        Self::reset(&self.state);
    }

    fn reset(state: &RefCell<ListenerState>) {
        let released = std::mem::take(&mut *state.borrow_mut());
        drop(released);
    }
}

impl fmt::Debug for BackgroundCloseService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundCloseService")
            .field("listening", &self.is_listening())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menukit_core::direction::Orientation;
    use menukit_core::element::ElementArena;
    use menukit_core::id::MenuId;
    use menukit_core::stack::MenuStackItem;

    fn item(id: u64, element: ElementId) -> MenuStackItem {
        MenuStackItem::new(MenuId(id), Some(element), Orientation::Vertical)
    }

    #[test]
    fn test_click_inside_keeps_menus_open() {
        let arena = Rc::new(ElementArena::new());
        let popup = arena.create_root();
        let inside = arena.create_child(popup);
        let stack = MenuStack::new();
        stack.push(item(1, popup));

        let service = BackgroundCloseService::new();
        let tree: Rc<dyn ElementTree> = arena.clone();
        service.start_listener(
            BackgroundCloseService::default_predicate(tree, None, stack.clone()),
            &stack,
        );

        assert!(!service.handle_pointer_down(&PointerEvent::new(inside)));
        assert_eq!(stack.len(), 1);
        assert!(service.is_listening());
    }

    #[test]
    fn test_click_outside_closes_and_stops_listening() {
        let arena = Rc::new(ElementArena::new());
        let popup = arena.create_root();
        let outside = arena.create_root();
        let stack = MenuStack::new();
        stack.push(item(1, popup));

        let service = BackgroundCloseService::new();
        let tree: Rc<dyn ElementTree> = arena.clone();
        service.start_listener(
            BackgroundCloseService::default_predicate(tree, None, stack.clone()),
            &stack,
        );

        assert!(service.handle_pointer_down(&PointerEvent::new(outside)));
        assert!(stack.is_empty());
        assert!(!service.is_listening());
    }

    #[test]
    fn test_missing_target_never_closes() {
        let stack = MenuStack::new();
        stack.push(MenuStackItem::new(MenuId(1), None, Orientation::Vertical));
        let service = BackgroundCloseService::new();
        service.start_listener(Rc::new(|_| true), &stack);

        assert!(!service.handle_pointer_down(&PointerEvent::default()));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_switching_stacks_closes_previous_tree() {
        let first = MenuStack::new();
        first.push(MenuStackItem::new(MenuId(1), None, Orientation::Vertical));
        let second = MenuStack::new();
        second.push(MenuStackItem::new(MenuId(2), None, Orientation::Vertical));

        let service = BackgroundCloseService::new();
        service.start_listener(Rc::new(|_| true), &first);
        service.start_listener(Rc::new(|_| true), &first);
        assert_eq!(first.len(), 1);

        service.start_listener(Rc::new(|_| true), &second);

        assert!(first.is_empty());
        assert!(service.is_tracking(&second));
    }

    #[test]
    fn test_keeps_listening_when_reopened_from_emptied() {
        let stack = MenuStack::new();
        let _reopen = {
            let handle = stack.clone();
            stack.subscribe_emptied(move |_| {
                handle.push(MenuStackItem::new(MenuId(2), None, Orientation::Vertical));
            })
        };
        stack.push(MenuStackItem::new(MenuId(1), None, Orientation::Vertical));
        let service = BackgroundCloseService::new();
        service.start_listener(Rc::new(|_| true), &stack);

        stack.close_all(FocusNext::NextItem);

        assert_eq!(stack.len(), 1);
        assert!(service.is_listening());
    }

    #[test]
    fn test_dispose_stops_without_closing() {
        let stack = MenuStack::new();
        stack.push(MenuStackItem::new(MenuId(1), None, Orientation::Vertical));
        let service = BackgroundCloseService::new();
        service.start_listener(Rc::new(|_| true), &stack);

        service.dispose();

        assert!(!service.is_listening());
        assert!(!service.handle_pointer_down(&PointerEvent::new(ElementId(0))));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_last_clone_releases_listener() {
        let stack = MenuStack::new();
        stack.push(MenuStackItem::new(MenuId(1), None, Orientation::Vertical));
        let service = BackgroundCloseService::new();
        service.start_listener(Rc::new(|_| true), &stack);
        let state = Rc::downgrade(&service.state);

        let handle = service.clone();
        drop(service);
        assert!(handle.is_listening());

        drop(handle);
        assert!(state.upgrade().is_none());

        stack.close_all(FocusNext::None);
        assert!(stack.is_empty());
    }
}
