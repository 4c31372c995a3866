// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::item::MenuItem;
use crate::menu::Menu;
use menukit_core::emitter::Emitter;
use menukit_core::stack::FocusNext;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Holds the popup [Menu] that one or more triggers open.
///
/// Only one trigger holds the open binding at a time.
#[derive(Default)]
pub struct MenuPanel {
    menu: RefCell<Option<Rc<Menu>>>,
    owner: RefCell<Weak<MenuItemTrigger>>,
}

impl MenuPanel {
    /// Create an empty panel. Building a popup with [crate::menu::MenuBuilder::panel]
    /// fills it.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// The menu of this panel.
    pub fn menu(&self) -> Option<Rc<Menu>> {
        self.menu.borrow().clone()
    }

    /// The trigger that currently has the panel open.
    pub fn owner(&self) -> Option<Rc<MenuItemTrigger>> {
        self.owner.borrow().upgrade()
    }

    pub(crate) fn attach_menu(&self, menu: Rc<Menu>) {
        let previous = self.menu.replace(Some(menu));
        if let Some(previous) = previous {
            log::warn!("Replacing menu {} of a panel", previous.id());
        }
    }

    fn bind(&self, trigger: Weak<MenuItemTrigger>) {
        *self.owner.borrow_mut() = trigger;
    }

    fn release(&self, trigger: &MenuItemTrigger) {
        let owned = self
            .owner()
            .is_some_and(|owner| std::ptr::eq(Rc::as_ptr(&owner), trigger));
        if owned {
            *self.owner.borrow_mut() = Weak::new();
        }
    }
}

impl fmt::Debug for MenuPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuPanel")
            .field("menu", &self.menu.borrow().as_ref().map(|menu| menu.id()))
            .field("bound", &self.owner().is_some())
            .finish()
    }
}

/// Opens and closes the submenu of a [MenuItem].
pub struct MenuItemTrigger {
    item: Weak<MenuItem>,
    panel: Rc<MenuPanel>,
    open: Cell<bool>,
    opened: Emitter<()>,
    closed: Emitter<()>,
    this: Weak<MenuItemTrigger>,
}

impl MenuItemTrigger {
    /// Attach a trigger for `panel` to `item`.
    pub fn new(item: &Rc<MenuItem>, panel: &Rc<MenuPanel>) -> Rc<Self> {
        let trigger = Rc::new_cyclic(|this| Self {
            item: Rc::downgrade(item),
            panel: panel.clone(),
            open: Cell::new(false),
            opened: Emitter::new(),
            closed: Emitter::new(),
            this: this.clone(),
        });
        item.attach_trigger(trigger.clone());
        trigger
    }

    /// The item this trigger belongs to.
    pub fn item(&self) -> Option<Rc<MenuItem>> {
        self.item.upgrade()
    }

    /// The panel this trigger opens.
    pub fn panel(&self) -> &Rc<MenuPanel> {
        &self.panel
    }

    /// The submenu this trigger opens.
    pub fn menu(&self) -> Option<Rc<Menu>> {
        self.panel.menu()
    }

    /// Returns if this trigger's submenu is open.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Emits after the submenu opened.
    pub fn opened(&self) -> &Emitter<()> {
        &self.opened
    }

    /// Emits after the submenu closed.
    pub fn closed(&self) -> &Emitter<()> {
        &self.closed
    }

    /// Open the submenu on the stack of the item's menu.
    pub fn open(&self) {
        if self.is_open() {
            return;
        }
        let Some(item) = self.item() else {
            return;
        };
        if item.is_disabled() {
            log::trace!("Not opening the submenu of disabled {}", item.id());
            return;
        }
        let Some(menu) = self.menu() else {
            log::warn!("Cannot open the submenu of {}, its panel has no menu", item.id());
            return;
        };
        let Some(parent) = item.parent_menu() else {
            log::warn!("Cannot open the submenu of {}, it is not inside a menu", item.id());
            return;
        };

        if let Some(owner) = self
            .panel
            .owner()
            .filter(|owner| !std::ptr::eq(Rc::as_ptr(owner), self))
        {
            owner.close_menu();
        }

        parent.close_sibling_submenu(&item);

        let stack = parent.stack();
        menu.attach(&stack, self.this.clone());
        if !stack.push(menu.stack_item()) {
            log::warn!("Submenu {} of {} is already open", menu.id(), item.id());
            return;
        }

        self.open.set(true);
        self.panel.bind(self.this.clone());
        parent.set_open_item(&item);
        parent.start_background_listener();

        log::debug!("Opened submenu {} of {}", menu.id(), item.id());
        self.opened.emit(&());
    }

    /// Close the submenu, returning focus to the item.
    pub fn close_menu(&self) {
        if !self.is_open() {
            return;
        }

        if let Some(menu) = self.menu() {
            menu.stack().close(&menu.stack_item(), FocusNext::CurrentItem);
        }

        if self.is_open() {
            self.mark_closed();
            if let Some(item) = self.item() {
                if let Some(parent) = item.parent_menu() {
                    parent.clear_open_item(&item);
                }
            }
        }
    }

    /// Open the submenu if closed, close it if open.
    pub fn toggle(&self) {
        if self.is_open() {
            self.close_menu();
        } else {
            self.open();
        }
    }

    pub(crate) fn mark_closed(&self) {
        if !self.open.replace(false) {
            return;
        }
        self.panel.release(self);
        log::debug!("Closed submenu of {:?}", self.item().map(|item| item.id()));
        self.closed.emit(&());
    }
}

impl fmt::Debug for MenuItemTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItemTrigger")
            .field("item", &self.item().map(|item| item.id()))
            .field("open", &self.is_open())
            .finish()
    }
}
