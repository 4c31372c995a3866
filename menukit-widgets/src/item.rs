// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::context::MenuEnvironment;
use crate::label::{extract_label, LabelNode};
use crate::menu::Menu;
use crate::trigger::MenuItemTrigger;
use menukit_core::dispatcher::SelectionDispatcher;
use menukit_core::element::ElementId;
use menukit_core::emitter::{Emitter, Subscription};
use menukit_core::id::ItemId;
use menukit_core::key_manager::KeyTarget;
use menukit_core::stack::FocusNext;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// The closed set of item variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// An item that activates or opens a submenu.
    Plain,
    /// An independently checkable item.
    Checkbox,
    /// A mutually exclusive item within its radio group.
    Radio,
}

struct Selection {
    checked: Cell<bool>,
    name: RefCell<String>,
    id: RefCell<String>,
    dispatcher: RefCell<SelectionDispatcher>,
    listener: RefCell<Option<Subscription>>,
}

/// A single entry of a menu.
///
/// Checkbox and radio items additionally carry a checked state plus a `name`
/// and `id` for radio grouping.
pub struct MenuItem {
    id: ItemId,
    kind: ItemKind,
    element: Option<ElementId>,
    content: RefCell<Vec<LabelNode>>,
    icon_markers: Vec<String>,
    close_on_activate: bool,
    disabled: Cell<bool>,
    selection: Option<Selection>,
    trigger: RefCell<Option<Rc<MenuItemTrigger>>>,
    parent: RefCell<Weak<Menu>>,
    activated: Emitter<()>,
    clicked: Emitter<Rc<MenuItem>>,
    this: Weak<MenuItem>,
}

impl MenuItem {
    /// Start building an item.
    pub fn builder(env: &MenuEnvironment) -> MenuItemBuilder {
        MenuItemBuilder {
            env: env.clone(),
            kind: ItemKind::Plain,
            content: Vec::new(),
            disabled: false,
            checked: false,
            name: None,
            selectable_id: None,
            element: None,
        }
    }

    /// Create a plain item with a text label.
    pub fn plain(env: &MenuEnvironment, label: impl Into<String>) -> Rc<Self> {
        Self::builder(env).label(label).build()
    }

    /// Create an unchecked checkbox item with a text label.
    pub fn checkbox(env: &MenuEnvironment, label: impl Into<String>) -> Rc<Self> {
        Self::builder(env).checkbox().label(label).build()
    }

    /// Create an unchecked radio item with a text label.
    pub fn radio(env: &MenuEnvironment, label: impl Into<String>) -> Rc<Self> {
        Self::builder(env).radio().label(label).build()
    }

    /// The item's id.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The item's variant.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The host element of the item.
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    /// Returns if the item is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// Enable or disable the item.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    /// Replace the item's content.
    pub fn set_content(&self, content: Vec<LabelNode>) {
        *self.content.borrow_mut() = content;
    }

    /// The visible label text, without icons.
    pub fn get_label(&self) -> String {
        extract_label(&self.content.borrow(), &self.icon_markers)
    }

    /// Returns if a submenu trigger is attached.
    pub fn has_menu(&self) -> bool {
        self.trigger.borrow().is_some()
    }

    /// The attached submenu trigger.
    pub fn menu_trigger(&self) -> Option<Rc<MenuItemTrigger>> {
        self.trigger.borrow().clone()
    }

    /// The container the item was added to.
    pub fn parent_menu(&self) -> Option<Rc<Menu>> {
        self.parent.borrow().upgrade()
    }

    /// Returns if the item is checked. Plain items are never checked.
    pub fn is_checked(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.checked.get())
    }

    /// The radio group name of a selectable item.
    pub fn name(&self) -> Option<String> {
        self.selection
            .as_ref()
            .map(|selection| selection.name.borrow().clone())
    }

    /// Change the radio group name of a selectable item.
    pub fn set_name(&self, name: impl Into<String>) {
        if let Some(selection) = &self.selection {
            *selection.name.borrow_mut() = name.into();
        }
    }

    /// The selection id of a selectable item.
    pub fn selectable_id(&self) -> Option<String> {
        self.selection
            .as_ref()
            .map(|selection| selection.id.borrow().clone())
    }

    /// Change the selection id of a selectable item.
    pub fn set_selectable_id(&self, id: impl Into<String>) {
        if let Some(selection) = &self.selection {
            *selection.id.borrow_mut() = id.into();
        }
    }

    /// Emits when a plain item without submenu is triggered.
    pub fn activated(&self) -> &Emitter<()> {
        &self.activated
    }

    /// Emits when a checkbox or radio item is triggered, after its state changed.
    pub fn clicked(&self) -> &Emitter<Rc<MenuItem>> {
        &self.clicked
    }

    /// Perform the item's action.
    ///
    /// Disabled items ignore this. Plain items with a submenu toggle it. Other plain
    /// items emit `activated` and close their menu tree if so configured.
    pub fn trigger(&self) {
        if self.is_disabled() {
            log::trace!("Ignoring trigger of disabled {}", self.id);
            return;
        }

        match (self.kind, &self.selection) {
            (ItemKind::Checkbox, Some(selection)) => {
                selection.checked.set(!selection.checked.get());
                self.emit_clicked();
            }
            (ItemKind::Radio, Some(selection)) => {
                let id = selection.id.borrow().clone();
                let name = selection.name.borrow().clone();
                let dispatcher = selection.dispatcher.borrow().clone();
                dispatcher.notify(&id, &name);
                self.emit_clicked();
            }
            _ => self.activate(),
        }
    }

    /// Route radio selections through `dispatcher` from now on.
    ///
    /// Has no effect on plain and checkbox items.
    pub fn bind_dispatcher(&self, dispatcher: &SelectionDispatcher) {
        let Some(selection) = self.selection.as_ref().filter(|_| self.kind == ItemKind::Radio) else {
            return;
        };

        let weak = self.this.clone();
        let listener = dispatcher.listen(move |id, name| {
            if let Some(item) = weak.upgrade() {
                item.on_selection(id, name);
            }
        });

        let previous = selection.listener.replace(Some(listener));
        *selection.dispatcher.borrow_mut() = dispatcher.clone();
        drop(previous);
    }

    /// The ARIA role.
    pub fn role(&self) -> &'static str {
        match self.kind {
            ItemKind::Plain => "menuitem",
            ItemKind::Checkbox => "menuitemcheckbox",
            ItemKind::Radio => "menuitemradio",
        }
    }

    /// The value for `aria-disabled`.
    pub fn aria_disabled(&self) -> Option<&'static str> {
        self.is_disabled().then_some("true")
    }

    /// The value for `aria-checked`. Only selectable items have one.
    pub fn aria_checked(&self) -> Option<&'static str> {
        self.selection
            .as_ref()
            .map(|selection| if selection.checked.get() { "true" } else { "false" })
    }

    /// The value for `aria-haspopup`.
    pub fn aria_haspopup(&self) -> Option<&'static str> {
        self.has_menu().then_some("menu")
    }

    pub(crate) fn set_parent(&self, menu: Weak<Menu>) {
        *self.parent.borrow_mut() = menu;
    }

    pub(crate) fn attach_trigger(&self, trigger: Rc<MenuItemTrigger>) {
        if self.kind != ItemKind::Plain {
            log::warn!("Attaching a submenu trigger to {:?} item {}", self.kind, self.id);
        }
        *self.trigger.borrow_mut() = Some(trigger);
    }

    fn activate(&self) {
        if let Some(trigger) = self.menu_trigger() {
            trigger.toggle();
            return;
        }

        log::debug!("Activated {} ({})", self.id, self.get_label());
        self.activated.emit(&());

        if self.close_on_activate {
            if let Some(parent) = self.parent_menu() {
                parent.stack().close_all(FocusNext::None);
            }
        }
    }

    fn on_selection(&self, id: &str, name: &str) {
        if let Some(selection) = &self.selection {
            let selected = *selection.id.borrow() == id && *selection.name.borrow() == name;
            selection.checked.set(selected);
        }
    }

    fn emit_clicked(&self) {
        if let Some(this) = self.this.upgrade() {
            self.clicked.emit(&this);
        }
    }
}

impl KeyTarget for MenuItem {
    fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    fn label(&self) -> String {
        self.get_label()
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("label", &self.get_label())
            .field("disabled", &self.is_disabled())
            .field("checked", &self.is_checked())
            .field("has_menu", &self.has_menu())
            .finish()
    }
}

/// Builder for [MenuItem].
pub struct MenuItemBuilder {
    env: MenuEnvironment,
    kind: ItemKind,
    content: Vec<LabelNode>,
    disabled: bool,
    checked: bool,
    name: Option<String>,
    selectable_id: Option<String>,
    element: Option<ElementId>,
}

impl MenuItemBuilder {
    /// Make the item a checkbox.
    pub fn checkbox(mut self) -> Self {
        self.kind = ItemKind::Checkbox;
        self
    }

    /// Make the item a radio.
    pub fn radio(mut self) -> Self {
        self.kind = ItemKind::Radio;
        self
    }

    /// Use a single text node as content.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.content = vec![LabelNode::text(label)];
        self
    }

    /// Use structured content.
    pub fn content(mut self, content: Vec<LabelNode>) -> Self {
        self.content = content;
        self
    }

    /// Start disabled.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Start checked. Ignored for plain items.
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Radio group name. Generated if unset.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Selection id. Generated if unset.
    pub fn selectable_id(mut self, id: impl Into<String>) -> Self {
        self.selectable_id = Some(id.into());
        self
    }

    /// The host element of the item.
    pub fn element(mut self, element: ElementId) -> Self {
        self.element = Some(element);
        self
    }

    /// Build the item. Radio items start with a dispatcher of their own until they
    /// join a menu or group.
    pub fn build(self) -> Rc<MenuItem> {
        let ids = self.env.ids();
        let config = self.env.config();

        let selection = match self.kind {
            ItemKind::Plain => None,
            ItemKind::Checkbox | ItemKind::Radio => Some(Selection {
                checked: Cell::new(self.checked),
                name: RefCell::new(self.name.unwrap_or_else(|| ids.next_selectable_name())),
                id: RefCell::new(
                    self.selectable_id
                        .unwrap_or_else(|| ids.next_selectable_id()),
                ),
                dispatcher: RefCell::new(SelectionDispatcher::new()),
                listener: RefCell::new(None),
            }),
        };

        let item = Rc::new_cyclic(|this| MenuItem {
            id: ids.next_item_id(),
            kind: self.kind,
            element: self.element,
            content: RefCell::new(self.content),
            icon_markers: config.icon_markers.clone(),
            close_on_activate: config.close_on_activate,
            disabled: Cell::new(self.disabled),
            selection,
            trigger: RefCell::new(None),
            parent: RefCell::new(Weak::new()),
            activated: Emitter::new(),
            clicked: Emitter::new(),
            this: this.clone(),
        });

        if item.kind == ItemKind::Radio {
            item.bind_dispatcher(&SelectionDispatcher::new());
        }

        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menukit_core::config::MenuConfig;

    fn env() -> MenuEnvironment {
        MenuEnvironment::new(MenuConfig::default())
    }

    #[test]
    fn test_checkbox_flips_and_emits_clicked() {
        let env = env();
        let item = MenuItem::checkbox(&env, "Bold");
        let clicks = Rc::new(Cell::new(0));
        let _sub = {
            let clicks = clicks.clone();
            item.clicked().subscribe(move |clicked| {
                assert!(clicked.is_checked());
                clicks.set(clicks.get() + 1);
            })
        };

        item.trigger();

        assert!(item.is_checked());
        assert_eq!(item.aria_checked(), Some("true"));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_disabled_item_ignores_trigger() {
        let env = env();
        let item = MenuItem::builder(&env).checkbox().label("Bold").disabled(true).build();
        let _sub = item.clicked().subscribe(|_| panic!("disabled item must not click"));

        item.trigger();

        assert!(!item.is_checked());
        assert_eq!(item.aria_disabled(), Some("true"));
    }

    #[test]
    fn test_plain_item_emits_activated() {
        let env = env();
        let item = MenuItem::plain(&env, "Open");
        let activated = Rc::new(Cell::new(false));
        let _sub = {
            let activated = activated.clone();
            item.activated().subscribe(move |_| activated.set(true))
        };

        item.trigger();

        assert!(activated.get());
        assert_eq!(item.role(), "menuitem");
        assert_eq!(item.aria_checked(), None);
        assert_eq!(item.aria_haspopup(), None);
    }

    #[test]
    fn test_radio_uses_shared_dispatcher() {
        let env = env();
        let dispatcher = SelectionDispatcher::new();
        let first = MenuItem::builder(&env).radio().name("group1").checked(true).build();
        let second = MenuItem::builder(&env).radio().name("group1").build();
        first.bind_dispatcher(&dispatcher);
        second.bind_dispatcher(&dispatcher);

        second.trigger();

        assert!(!first.is_checked());
        assert!(second.is_checked());
        assert_eq!(dispatcher.listener_count(), 2);
    }

    #[test]
    fn test_selectable_defaults_are_generated() {
        let env = env();
        let first = MenuItem::radio(&env, "A");
        let second = MenuItem::checkbox(&env, "B");
        let plain = MenuItem::plain(&env, "C");

        assert_eq!(first.name().as_deref(), Some("menu-item-radio-0"));
        assert_eq!(first.selectable_id().as_deref(), Some("menu-item-radio-0"));
        assert_eq!(second.name().as_deref(), Some("menu-item-radio-1"));
        assert_eq!(plain.name(), None);
    }
}
