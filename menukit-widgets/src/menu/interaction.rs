// SPDX-License-Identifier: MIT OR Apache-2.0
use super::{Menu, MenuRole, SubmenuFocus};
use crate::item::MenuItem;
use menukit_core::focus::FocusOrigin;
use menukit_core::stack::FocusNext;
use menukit_services::background::BackgroundCloseService;
use std::rc::Rc;

impl Menu {
    /// Handle a pointer click on one of this menu's items.
    ///
    /// In a bar, clicking an item with a submenu toggles it. Elsewhere the submenu
    /// is opened. Items without a submenu are triggered.
    pub fn handle_click(&self, item: &Rc<MenuItem>) {
        if item.is_disabled() {
            log::trace!("Ignoring click on disabled {}", item.id());
            return;
        }
        log::trace!("Click on {} in menu {}", item.id(), self.id);

        match item.menu_trigger() {
            Some(trigger) => {
                if self.role == MenuRole::Bar {
                    trigger.toggle();
                } else {
                    trigger.open();
                }
                self.focus_item(item, FocusOrigin::Mouse);
            }
            None => {
                self.focus_item(item, FocusOrigin::Mouse);
                item.trigger();
            }
        }
    }

    /// Handle the pointer entering one of this menu's items.
    ///
    /// The item becomes active. Vertical menus, and bars that already show a
    /// submenu, switch to the hovered item's submenu.
    pub fn handle_pointer_enter(&self, item: &Rc<MenuItem>) {
        if item.is_disabled() {
            return;
        }

        let open = self.open_item();
        let sibling_open = open
            .as_ref()
            .is_some_and(|open| !Rc::ptr_eq(open, item));
        let follows_pointer = self.role != MenuRole::Bar || open.is_some();

        if follows_pointer {
            match item.menu_trigger() {
                Some(trigger) => trigger.open(),
                None if sibling_open => self.close_submenu_quietly(),
                None => {}
            }
        }

        self.focus_item(item, FocusOrigin::Mouse);
    }

    /// Close the submenu opened from this container and focus its item.
    /// Returns if a submenu was open.
    pub fn close_open_submenu(&self) -> bool {
        self.close_open_submenu_with(FocusNext::CurrentItem)
    }

    pub(crate) fn close_sibling_submenu(&self, opening: &Rc<MenuItem>) {
        let sibling_open = self
            .open_item()
            .is_some_and(|open| !Rc::ptr_eq(&open, opening));
        if sibling_open {
            self.close_submenu_quietly();
        }
    }

    pub(crate) fn set_open_item(&self, item: &Rc<MenuItem>) {
        *self.open_item.borrow_mut() = Some(item.clone());
    }

    pub(crate) fn clear_open_item(&self, item: &Rc<MenuItem>) {
        let mut open = self.open_item.borrow_mut();
        if open.as_ref().is_some_and(|open| Rc::ptr_eq(open, item)) {
            *open = None;
        }
    }

    /// Open the submenu of `item` and optionally move focus into it.
    pub(crate) fn open_submenu(&self, item: &Rc<MenuItem>, focus: Option<SubmenuFocus>) -> bool {
        let Some(trigger) = item.menu_trigger() else {
            return false;
        };

        trigger.open();
        if !trigger.is_open() {
            return false;
        }

        if let (Some(focus), Some(menu)) = (focus, trigger.menu()) {
            match focus {
                SubmenuFocus::First => menu.focus_first_item(FocusOrigin::Keyboard),
                SubmenuFocus::Last => menu.focus_last_item(FocusOrigin::Keyboard),
            }
        }
        true
    }

    pub(crate) fn start_background_listener(&self) {
        let env = self.env();
        let stack = self.stack();
        let root = self.root_menu().and_then(|root| root.element());

        let should_close =
            BackgroundCloseService::default_predicate(env.elements().clone(), root, stack.clone());
        env.background().start_listener(should_close, &stack);
    }

    fn close_submenu_quietly(&self) {
        let switching = self.switching.replace(true);
        self.close_open_submenu_with(FocusNext::None);
        self.switching.set(switching);
    }

    fn close_open_submenu_with(&self, focus_next: FocusNext) -> bool {
        let Some(item) = self.open_item() else {
            return false;
        };

        if let Some(trigger) = item.menu_trigger() {
            if let Some(menu) = trigger.menu() {
                menu.stack().close(&menu.stack_item(), focus_next);
            }
            trigger.mark_closed();
        }
        self.clear_open_item(&item);
        true
    }
}
