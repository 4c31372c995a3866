// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(dead_code)]

use menukit_core::clock::ManualClock;
use menukit_core::config::MenuConfig;
use menukit_core::element::{ElementArena, ElementId};
use menukit_core::event::{Key, KeyEvent, KeyHandling};
use menukit_core::id::ItemId;
use menukit_widgets::context::{MenuContext, MenuEnvironment};
use menukit_widgets::item::MenuItem;
use menukit_widgets::menu::Menu;
use menukit_widgets::trigger::{MenuItemTrigger, MenuPanel};
use std::rc::Rc;

pub fn environment(config: MenuConfig) -> (MenuEnvironment, Rc<ManualClock>, Rc<ElementArena>) {
    let clock = Rc::new(ManualClock::new());
    let arena = Rc::new(ElementArena::new());
    let env = MenuEnvironment::builder(config)
        .clock(clock.clone())
        .elements(arena.clone())
        .build();
    (env, clock, arena)
}

pub fn item(env: &MenuEnvironment, arena: &ElementArena, parent: ElementId, label: &str) -> Rc<MenuItem> {
    MenuItem::builder(env)
        .label(label)
        .element(arena.create_child(parent))
        .build()
}

pub fn popup(ctx: &MenuContext, arena: &ElementArena, opener: &Rc<MenuItem>) -> (Rc<Menu>, ElementId) {
    let panel = MenuPanel::new();
    let element = arena.create_root();
    let menu = Menu::popup(ctx)
        .panel(&panel)
        .element(element)
        .build()
        .unwrap();
    MenuItemTrigger::new(opener, &panel);
    (menu, element)
}

pub fn press(menu: &Menu, key: Key) -> KeyHandling {
    menu.handle_key(&KeyEvent::new(key))
}

/// A menubar `File | Edit | Help`.
///
/// File opens `New | Open | Recent`, Recent opens `a.txt | b.txt | Older`, Older opens
/// `old.txt`. Edit opens `Undo | Redo`. Help is a plain item.
pub struct MenuBarFixture {
    pub env: MenuEnvironment,
    pub clock: Rc<ManualClock>,
    pub arena: Rc<ElementArena>,
    pub outside: ElementId,
    pub bar: Rc<Menu>,
    pub file: Rc<MenuItem>,
    pub edit: Rc<MenuItem>,
    pub help: Rc<MenuItem>,
    pub file_menu: Rc<Menu>,
    pub new: Rc<MenuItem>,
    pub open: Rc<MenuItem>,
    pub recent: Rc<MenuItem>,
    pub recent_menu: Rc<Menu>,
    pub first_recent: Rc<MenuItem>,
    pub older: Rc<MenuItem>,
    pub older_menu: Rc<Menu>,
    pub oldest: Rc<MenuItem>,
    pub edit_menu: Rc<Menu>,
    pub undo: Rc<MenuItem>,
    pub redo: Rc<MenuItem>,
}

impl MenuBarFixture {
    pub fn new() -> Self {
        Self::with_config(MenuConfig::default())
    }

    pub fn with_config(config: MenuConfig) -> Self {
        let (env, clock, arena) = environment(config);
        let ctx = env.new_tree();
        let outside = arena.create_root();

        let bar_element = arena.create_root();
        let bar = Menu::bar(&ctx).element(bar_element).build().unwrap();
        let file = item(&env, &arena, bar_element, "File");
        let edit = item(&env, &arena, bar_element, "Edit");
        let help = item(&env, &arena, bar_element, "Help");

        let (file_menu, file_element) = popup(&ctx, &arena, &file);
        let new = item(&env, &arena, file_element, "New");
        let open = item(&env, &arena, file_element, "Open");
        let recent = item(&env, &arena, file_element, "Recent");

        let (recent_menu, recent_element) = popup(&ctx, &arena, &recent);
        let first_recent = item(&env, &arena, recent_element, "a.txt");
        let second_recent = item(&env, &arena, recent_element, "b.txt");
        let older = item(&env, &arena, recent_element, "Older");

        let (older_menu, older_element) = popup(&ctx, &arena, &older);
        let oldest = item(&env, &arena, older_element, "old.txt");

        let (edit_menu, edit_element) = popup(&ctx, &arena, &edit);
        let undo = item(&env, &arena, edit_element, "Undo");
        let redo = item(&env, &arena, edit_element, "Redo");

        for entry in [&file, &edit, &help] {
            bar.add_item(entry.clone());
        }
        for entry in [&new, &open, &recent] {
            file_menu.add_item(entry.clone());
        }
        for entry in [&first_recent, &second_recent, &older] {
            recent_menu.add_item(entry.clone());
        }
        older_menu.add_item(oldest.clone());
        edit_menu.add_item(undo.clone());
        edit_menu.add_item(redo.clone());

        Self {
            env,
            clock,
            arena,
            outside,
            bar,
            file,
            edit,
            help,
            file_menu,
            new,
            open,
            recent,
            recent_menu,
            first_recent,
            older,
            older_menu,
            oldest,
            edit_menu,
            undo,
            redo,
        }
    }

    pub fn focused(&self) -> Option<ItemId> {
        self.env.focused_item()
    }

    /// Open File, Recent and Older from the keyboard.
    pub fn open_three_levels(&self) {
        self.bar.handle_focus();
        press(&self.bar, Key::ArrowDown);
        self.file_menu
            .focus_item(&self.recent, menukit_core::focus::FocusOrigin::Keyboard);
        press(&self.file_menu, Key::ArrowRight);
        self.recent_menu
            .focus_item(&self.older, menukit_core::focus::FocusOrigin::Keyboard);
        press(&self.recent_menu, Key::ArrowRight);
    }
}
