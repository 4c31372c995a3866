// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::context::{MenuContext, MenuEnvironment};
use crate::group::MenuGroup;
use crate::item::{ItemKind, MenuItem};
use crate::trigger::{MenuItemTrigger, MenuPanel};
use indexmap::IndexMap;
use menukit_core::direction::Orientation;
use menukit_core::dispatcher::SelectionDispatcher;
use menukit_core::element::ElementId;
use menukit_core::emitter::{Emitter, Subscription};
use menukit_core::error::{MenuError, MenuResult};
use menukit_core::focus::FocusOrigin;
use menukit_core::id::{ItemId, MenuId};
use menukit_core::key_manager::KeyManager;
use menukit_core::stack::{FocusNext, MenuStack, MenuStackItem};
use menukit_core::type_ahead::TypeAhead;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

mod interaction;
mod keyboard;

/// The kind of container a [Menu] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuRole {
    /// A root menubar.
    Bar,
    /// A root menu that is always visible.
    Inline,
    /// A submenu living in a [MenuPanel].
    Popup,
}

/// A menu container: a menubar, an inline menu or a popup submenu.
///
/// Root containers (bar and inline) own the stack of their [MenuContext]. Popups
/// take over the stack of whichever container opens them.
pub struct Menu {
    id: MenuId,
    role: MenuRole,
    orientation: Orientation,
    element: Option<ElementId>,
    ctx: RefCell<MenuContext>,
    items: RefCell<Vec<Rc<MenuItem>>>,
    groups: RefCell<Vec<Rc<MenuGroup>>>,
    dispatcher: SelectionDispatcher,
    keys: RefCell<KeyManager>,
    type_ahead: RefCell<TypeAhead>,
    open_item: RefCell<Option<Rc<MenuItem>>>,
    switching: Cell<bool>,
    parent_trigger: RefCell<Weak<MenuItemTrigger>>,
    change: Emitter<Rc<MenuItem>>,
    closed: Emitter<()>,
    stack_subscriptions: RefCell<Vec<Subscription>>,
    item_subscriptions: RefCell<IndexMap<ItemId, Subscription>>,
    this: Weak<Menu>,
}

impl Menu {
    /// Start building a menubar.
    pub fn bar(ctx: &MenuContext) -> MenuBuilder {
        MenuBuilder::new(ctx, MenuRole::Bar)
    }

    /// Start building an inline menu.
    pub fn inline(ctx: &MenuContext) -> MenuBuilder {
        MenuBuilder::new(ctx, MenuRole::Inline)
    }

    /// Start building a popup menu. A panel is required.
    pub fn popup(ctx: &MenuContext) -> MenuBuilder {
        MenuBuilder::new(ctx, MenuRole::Popup)
    }

    /// The menu's id.
    pub fn id(&self) -> MenuId {
        self.id
    }

    /// The container kind.
    pub fn menu_role(&self) -> MenuRole {
        self.role
    }

    /// Returns if this is a bar or inline menu.
    pub fn is_root(&self) -> bool {
        self.role != MenuRole::Popup
    }

    /// The layout axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The host element of the menu.
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    /// The application environment.
    pub fn env(&self) -> MenuEnvironment {
        self.ctx.borrow().env().clone()
    }

    /// The stack this menu currently belongs to.
    pub fn stack(&self) -> MenuStack {
        self.ctx.borrow().stack().clone()
    }

    /// This menu as a stack entry.
    pub fn stack_item(&self) -> MenuStackItem {
        MenuStackItem::new(self.id, self.element, self.orientation)
    }

    /// Returns if the menu is shown. Root menus always are; popups while on the stack.
    pub fn is_open(&self) -> bool {
        self.is_root() || self.stack().contains(&self.stack_item())
    }

    /// The items in navigation order.
    pub fn items(&self) -> Vec<Rc<MenuItem>> {
        self.items.borrow().clone()
    }

    /// The groups added to this menu.
    pub fn groups(&self) -> Vec<Rc<MenuGroup>> {
        self.groups.borrow().clone()
    }

    /// The dispatcher radio items added directly to this menu share.
    pub fn dispatcher(&self) -> &SelectionDispatcher {
        &self.dispatcher
    }

    /// Emits the triggered item when a checkbox or radio added directly to this
    /// menu is triggered. Closed for good once a group is added.
    pub fn change(&self) -> &Emitter<Rc<MenuItem>> {
        &self.change
    }

    /// Emits when a popup is removed from its stack.
    pub fn closed(&self) -> &Emitter<()> {
        &self.closed
    }

    /// The item whose submenu is open.
    pub fn open_item(&self) -> Option<Rc<MenuItem>> {
        self.open_item.borrow().clone()
    }

    /// The active item.
    pub fn active_item(&self) -> Option<Rc<MenuItem>> {
        let index = self.keys.borrow().active_index()?;
        self.items.borrow().get(index).cloned()
    }

    /// The trigger that opened this popup.
    pub fn parent_trigger(&self) -> Option<Rc<MenuItemTrigger>> {
        self.parent_trigger.borrow().upgrade()
    }

    /// The container holding the item that opened this popup.
    pub fn parent_menu(&self) -> Option<Rc<Menu>> {
        self.parent_trigger()?.item()?.parent_menu()
    }

    /// The root container of this menu's tree.
    pub fn root_menu(&self) -> Option<Rc<Menu>> {
        let mut current = self.this.upgrade()?;
        while let Some(parent) = current.parent_menu() {
            current = parent;
        }
        Some(current)
    }

    /// The ARIA role.
    pub fn role(&self) -> &'static str {
        match self.role {
            MenuRole::Bar => "menubar",
            MenuRole::Inline | MenuRole::Popup => "menu",
        }
    }

    /// The value for `aria-orientation`.
    pub fn aria_orientation(&self) -> &'static str {
        self.orientation.as_str()
    }

    /// The tab index of the container element.
    pub fn tab_index(&self) -> i32 {
        if self.is_root() {
            0
        } else {
            -1
        }
    }

    /// Append an item.
    ///
    /// Radio items join this menu's dispatcher. Checkbox and radio items report
    /// through [Menu::change].
    pub fn add_item(&self, item: Rc<MenuItem>) {
        if item.kind() == ItemKind::Radio {
            item.bind_dispatcher(&self.dispatcher);
        }
        if item.kind() != ItemKind::Plain {
            let change = self.change.clone();
            let subscription = item.clicked().subscribe(move |clicked| change.emit(clicked));
            let previous = self
                .item_subscriptions
                .borrow_mut()
                .insert(item.id(), subscription);
            drop(previous);
        }
        self.register_item(&item);
    }

    /// Append a group. Its items take part in this menu's navigation, while
    /// selection and change events stay within the group.
    pub fn add_group(&self, group: Rc<MenuGroup>) {
        if !self.change.is_closed() {
            log::debug!("Menu {} now reports changes through its groups", self.id);
            self.change.close();
        }
        group.attach(self);
        self.groups.borrow_mut().push(group);
    }

    /// Remove an item, closing its submenu first.
    ///
    /// The item stops reporting through this menu and its groups, and a radio falls
    /// back to a dispatcher of its own.
    pub fn remove_item(&self, item: &Rc<MenuItem>) {
        if self
            .open_item()
            .is_some_and(|open| Rc::ptr_eq(&open, item))
        {
            self.close_open_submenu();
        }

        let removed = {
            let mut items = self.items.borrow_mut();
            let index = items.iter().position(|entry| Rc::ptr_eq(entry, item));
            if let Some(index) = index {
                items.remove(index);
            }
            index
        };
        let Some(removed) = removed else {
            return;
        };

        {
            let mut keys = self.keys.borrow_mut();
            match keys.active_index() {
                Some(active) if active == removed => keys.set_active_index(None),
                Some(active) if active > removed => keys.set_active_index(Some(active - 1)),
                _ => {}
            }
        }

        let forwarding = self.item_subscriptions.borrow_mut().shift_remove(&item.id());
        drop(forwarding);
        for group in self.groups() {
            group.release_item(item);
        }
        if item.kind() == ItemKind::Radio {
            item.bind_dispatcher(&SelectionDispatcher::new());
        }
        item.set_parent(Weak::new());

        log::debug!("Removed {} from menu {}", item.id(), self.id);
    }

    /// Called when the host gives the container focus. Roots focus their first item.
    pub fn handle_focus(&self) {
        if self.is_root() {
            self.focus_first_item(FocusOrigin::Program);
        }
    }

    /// Focus the first enabled item.
    pub fn focus_first_item(&self, origin: FocusOrigin) {
        let items = self.items();
        let index = self.keys.borrow_mut().first(&items);
        if let Some(index) = index {
            self.focus_index(&items, index, origin);
        }
    }

    /// Focus the last enabled item.
    pub fn focus_last_item(&self, origin: FocusOrigin) {
        let items = self.items();
        let index = self.keys.borrow_mut().last(&items);
        if let Some(index) = index {
            self.focus_index(&items, index, origin);
        }
    }

    /// Focus a specific item of this menu. Disabled items are skipped.
    pub fn focus_item(&self, item: &Rc<MenuItem>, origin: FocusOrigin) {
        if item.is_disabled() {
            log::trace!("Not focusing disabled {}", item.id());
            return;
        }
        let items = self.items();
        match items.iter().position(|entry| Rc::ptr_eq(entry, item)) {
            Some(index) => {
                self.keys.borrow_mut().set_active_index(Some(index));
                self.focus_index(&items, index, origin);
            }
            None => log::trace!("{} is not an item of menu {}", item.id(), self.id),
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<Menu> {
        self.this.clone()
    }

    pub(crate) fn register_item(&self, item: &Rc<MenuItem>) {
        item.set_parent(self.this.clone());
        self.items.borrow_mut().push(item.clone());
    }

    /// Take over `stack` and prepare for being opened by `trigger`.
    pub(crate) fn attach(&self, stack: &MenuStack, trigger: Weak<MenuItemTrigger>) {
        *self.parent_trigger.borrow_mut() = trigger;
        self.ctx.borrow_mut().set_stack(stack.clone());
        self.subscribe_to_stack();
        self.keys.borrow_mut().set_active_index(None);
        self.type_ahead.borrow_mut().reset();
    }

    fn focus_index(&self, items: &[Rc<MenuItem>], index: usize, origin: FocusOrigin) {
        if let Some(item) = items.get(index) {
            self.env().focus().borrow_mut().set_focus(item.id(), origin);
        }
    }

    fn subscribe_to_stack(&self) {
        let stack = self.stack();
        let mut subscriptions = Vec::with_capacity(2);

        let weak = self.this.clone();
        subscriptions.push(stack.subscribe_closed(move |closed| {
            if let Some(menu) = weak.upgrade() {
                menu.on_stack_closed(closed);
            }
        }));

        if self.is_root() {
            let weak = self.this.clone();
            subscriptions.push(stack.subscribe_emptied(move |focus_next| {
                if let Some(menu) = weak.upgrade() {
                    menu.on_stack_emptied(*focus_next);
                }
            }));
        }

        let previous = self.stack_subscriptions.replace(subscriptions);
        drop(previous);
    }

    fn on_stack_closed(&self, closed: &MenuStackItem) {
        if let Some(item) = self.open_item() {
            let closes_open_item = item
                .menu_trigger()
                .and_then(|trigger| trigger.menu())
                .is_some_and(|menu| menu.id() == closed.menu());

            if closes_open_item {
                *self.open_item.borrow_mut() = None;
                if let Some(trigger) = item.menu_trigger() {
                    trigger.mark_closed();
                }
                if !self.is_switching() {
                    self.focus_item(&item, FocusOrigin::Keyboard);
                }
            }
        }

        if self.role == MenuRole::Popup && closed.menu() == self.id {
            self.on_removed_from_stack();
        }
    }

    /// Returns if this menu or one of its ancestors is quietly switching submenus.
    fn is_switching(&self) -> bool {
        self.switching.get() || self.parent_menu().is_some_and(|parent| parent.is_switching())
    }

    fn on_removed_from_stack(&self) {
        let subscriptions = self.stack_subscriptions.take();
        drop(subscriptions);
        self.keys.borrow_mut().set_active_index(None);
        self.type_ahead.borrow_mut().reset();

        if let Some(trigger) = self.parent_trigger() {
            trigger.mark_closed();
        }

        log::debug!("Menu {} closed", self.id);
        self.closed.emit(&());
    }

    fn on_stack_emptied(&self, focus_next: FocusNext) {
        log::trace!("Menu {} handling emptied stack ({:?})", self.id, focus_next);

        match focus_next {
            FocusNext::None => {}
            FocusNext::CurrentItem => self.refocus_active_item(),
            FocusNext::NextItem | FocusNext::PreviousItem if self.orientation.is_horizontal() => {
                let items = self.items();
                let index = {
                    let mut keys = self.keys.borrow_mut();
                    if focus_next == FocusNext::NextItem {
                        keys.next(&items)
                    } else {
                        keys.previous(&items)
                    }
                };
                let Some(item) = index.and_then(|index| items.get(index).cloned()) else {
                    return;
                };

                self.focus_item(&item, FocusOrigin::Keyboard);
                if item.has_menu() {
                    self.open_submenu(&item, Some(SubmenuFocus::First));
                }
            }
            FocusNext::NextItem | FocusNext::PreviousItem => self.refocus_active_item(),
        }
    }

    fn refocus_active_item(&self) {
        if let Some(item) = self.active_item() {
            self.focus_item(&item, FocusOrigin::Keyboard);
        }
    }
}

/// Where focus lands after a submenu opened from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubmenuFocus {
    First,
    Last,
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("orientation", &self.orientation)
            .field("items", &self.items.borrow().len())
            .field("open_item", &self.open_item().map(|item| item.id()))
            .finish()
    }
}

/// Builder for [Menu].
pub struct MenuBuilder {
    ctx: MenuContext,
    role: MenuRole,
    orientation: Option<Orientation>,
    element: Option<ElementId>,
    panel: Option<Rc<MenuPanel>>,
    dispatcher: Option<SelectionDispatcher>,
}

impl MenuBuilder {
    fn new(ctx: &MenuContext, role: MenuRole) -> Self {
        Self {
            ctx: ctx.clone(),
            role,
            orientation: None,
            element: None,
            panel: None,
            dispatcher: None,
        }
    }

    /// Override the orientation configured for this kind of menu.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// The host element of the menu.
    pub fn element(mut self, element: ElementId) -> Self {
        self.element = Some(element);
        self
    }

    /// The panel a popup lives in.
    pub fn panel(mut self, panel: &Rc<MenuPanel>) -> Self {
        self.panel = Some(panel.clone());
        self
    }

    /// Share a dispatcher with other containers instead of using a fresh one.
    pub fn dispatcher(mut self, dispatcher: SelectionDispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Build the menu.
    pub fn build(self) -> MenuResult<Rc<Menu>> {
        let panel = match (self.role, self.panel) {
            (MenuRole::Popup, None) => return Err(MenuError::MissingMenuPanel),
            (MenuRole::Popup, Some(panel)) => Some(panel),
            (_, Some(_)) => {
                log::warn!("Ignoring the panel of a {:?} menu", self.role);
                None
            }
            (_, None) => None,
        };

        let env = self.ctx.env().clone();
        let config = env.config();
        let orientation = self.orientation.unwrap_or(match self.role {
            MenuRole::Bar => config.bar_orientation,
            MenuRole::Inline | MenuRole::Popup => config.menu_orientation,
        });

        let menu = Rc::new_cyclic(|this| Menu {
            id: env.ids().next_menu_id(),
            role: self.role,
            orientation,
            element: self.element,
            ctx: RefCell::new(self.ctx),
            items: RefCell::new(Vec::new()),
            groups: RefCell::new(Vec::new()),
            dispatcher: self.dispatcher.unwrap_or_default(),
            keys: RefCell::new(KeyManager::new(config.wrap_navigation)),
            type_ahead: RefCell::new(TypeAhead::new(config.type_ahead_debounce())),
            open_item: RefCell::new(None),
            switching: Cell::new(false),
            parent_trigger: RefCell::new(Weak::new()),
            change: Emitter::new(),
            closed: Emitter::new(),
            stack_subscriptions: RefCell::new(Vec::new()),
            item_subscriptions: RefCell::new(IndexMap::new()),
            this: this.clone(),
        });

        if menu.is_root() {
            menu.subscribe_to_stack();
        }
        if let Some(panel) = panel {
            panel.attach_menu(menu.clone());
        }

        log::debug!("Built {:?} menu {}", menu.role, menu.id);
        Ok(menu)
    }
}
