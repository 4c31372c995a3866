// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::item::{ItemKind, MenuItem};
use crate::menu::Menu;
use indexmap::IndexMap;
use menukit_core::dispatcher::SelectionDispatcher;
use menukit_core::emitter::{Emitter, Subscription};
use menukit_core::id::ItemId;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A set of items inside a menu that forms its own radio scope and reports its
/// own selection changes.
pub struct MenuGroup {
    dispatcher: SelectionDispatcher,
    items: RefCell<Vec<Rc<MenuItem>>>,
    change: Emitter<Rc<MenuItem>>,
    menu: RefCell<Weak<Menu>>,
    subscriptions: RefCell<IndexMap<ItemId, Subscription>>,
}

impl MenuGroup {
    /// Create a group with a dispatcher of its own.
    pub fn new() -> Rc<Self> {
        Self::with_dispatcher(SelectionDispatcher::new())
    }

    /// Create a group that shares `dispatcher` with other groups.
    pub fn with_dispatcher(dispatcher: SelectionDispatcher) -> Rc<Self> {
        Rc::new(Self {
            dispatcher,
            items: RefCell::new(Vec::new()),
            change: Emitter::new(),
            menu: RefCell::new(Weak::new()),
            subscriptions: RefCell::new(IndexMap::new()),
        })
    }

    /// The group's dispatcher.
    pub fn dispatcher(&self) -> &SelectionDispatcher {
        &self.dispatcher
    }

    /// Emits the triggered item whenever a checkbox or radio of this group is triggered.
    pub fn change(&self) -> &Emitter<Rc<MenuItem>> {
        &self.change
    }

    /// The group's items.
    pub fn items(&self) -> Vec<Rc<MenuItem>> {
        self.items.borrow().clone()
    }

    /// The menu the group was added to.
    pub fn menu(&self) -> Option<Rc<Menu>> {
        self.menu.borrow().upgrade()
    }

    /// Append an item. If the group already belongs to a menu, the item joins the
    /// menu's navigation right away.
    pub fn add_item(&self, item: Rc<MenuItem>) {
        if item.kind() == ItemKind::Radio {
            item.bind_dispatcher(&self.dispatcher);
        }
        if item.kind() != ItemKind::Plain {
            let change = self.change.clone();
            let subscription = item.clicked().subscribe(move |clicked| change.emit(clicked));
            let previous = self.subscriptions.borrow_mut().insert(item.id(), subscription);
            drop(previous);
        }

        if let Some(menu) = self.menu() {
            menu.register_item(&item);
        }
        self.items.borrow_mut().push(item);
    }

    /// Forget `item`, dropping its change forwarding. Returns if it was a member.
    pub(crate) fn release_item(&self, item: &Rc<MenuItem>) -> bool {
        let position = self
            .items
            .borrow()
            .iter()
            .position(|entry| Rc::ptr_eq(entry, item));
        let Some(position) = position else {
            return false;
        };

        let removed = self.items.borrow_mut().remove(position);
        let forwarding = self.subscriptions.borrow_mut().shift_remove(&item.id());
        drop((removed, forwarding));
        true
    }

    pub(crate) fn attach(&self, menu: &Menu) {
        *self.menu.borrow_mut() = menu.downgrade();
        for item in self.items() {
            menu.register_item(&item);
        }
    }
}

impl fmt::Debug for MenuGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuGroup")
            .field("items", &self.items.borrow().len())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
