// SPDX-License-Identifier: MIT OR Apache-2.0
use menukit::prelude::*;
use std::rc::Rc;

struct EditorMenus {
    bar: Rc<Menu>,
    file_menu: Rc<Menu>,
    view_menu: Rc<Menu>,
    recent: Rc<MenuItem>,
    outside: ElementId,
}

fn leaf(env: &MenuEnvironment, arena: &ElementArena, parent: ElementId, label: &str) -> Rc<MenuItem> {
    MenuItem::builder(env)
        .label(label)
        .element(arena.create_child(parent))
        .build()
}

fn submenu(ctx: &MenuContext, arena: &ElementArena, opener: &Rc<MenuItem>) -> MenuResult<(Rc<Menu>, ElementId)> {
    let panel = MenuPanel::new();
    let element = arena.create_root();
    let menu = Menu::popup(ctx).panel(&panel).element(element).build()?;
    MenuItemTrigger::new(opener, &panel);
    Ok((menu, element))
}

fn build(env: &MenuEnvironment, arena: &ElementArena) -> MenuResult<EditorMenus> {
    let ctx = env.new_tree();
    let outside = arena.create_root();
    let bar_element = arena.create_root();
    let bar = Menu::bar(&ctx).element(bar_element).build()?;

    let file = leaf(env, arena, bar_element, "File");
    let view = leaf(env, arena, bar_element, "View");
    let help = leaf(env, arena, bar_element, "Help");

    let (file_menu, file_element) = submenu(&ctx, arena, &file)?;
    let save = leaf(env, arena, file_element, "Save");
    let recent = leaf(env, arena, file_element, "Open Recent");
    let (recent_menu, recent_element) = submenu(&ctx, arena, &recent)?;
    for name in ["document1.txt", "project.rs", "notes.md"] {
        let entry = leaf(env, arena, recent_element, name);
        let label = name.to_string();
        entry
            .activated()
            .subscribe(move |_| log::info!("Opening {}", label))
            .detach();
        recent_menu.add_item(entry);
    }
    save.activated()
        .subscribe(|_| log::info!("Saving"))
        .detach();
    file_menu.add_item(save);
    file_menu.add_item(recent.clone());

    let (view_menu, view_element) = submenu(&ctx, arena, &view)?;
    let word_wrap = MenuItem::builder(env)
        .checkbox()
        .label("Word Wrap")
        .element(arena.create_child(view_element))
        .build();
    word_wrap
        .clicked()
        .subscribe(|item| log::info!("{} checked: {}", item.get_label(), item.is_checked()))
        .detach();
    view_menu.add_item(word_wrap);

    let theme = MenuGroup::new();
    for (index, name) in ["Light", "Dark", "System"].into_iter().enumerate() {
        let item = MenuItem::builder(env)
            .radio()
            .label(name)
            .name("theme")
            .checked(index == 2)
            .element(arena.create_child(view_element))
            .build();
        theme.add_item(item);
    }
    theme
        .change()
        .subscribe(|item| log::info!("Theme is now {}", item.get_label()))
        .detach();
    view_menu.add_group(theme);

    bar.add_item(file);
    bar.add_item(view);
    bar.add_item(help);

    Ok(EditorMenus {
        bar,
        file_menu,
        view_menu,
        recent,
        outside,
    })
}

fn press(menu: &Menu, key: Key) {
    let handling = menu.handle_key(&KeyEvent::new(key));
    log::debug!("{:?} in {} -> {:?}", key, menu.id(), handling);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = smol::block_on(SettingsRegistry::new()).unwrap_or_else(|err| {
        log::warn!("Falling back to default menu settings: {}", err);
        SettingsRegistry::with_defaults()
    });

    let arena = Rc::new(ElementArena::new());
    let env = MenuEnvironment::builder(settings.config())
        .elements(arena.clone())
        .build();
    let menus = build(&env, &arena)?;
    let stack = menus.bar.stack();
    stack
        .subscribe_closed(|item| log::info!("Closed {}", item.menu()))
        .detach();

    // Walk into File > Open Recent with the keyboard and pick an entry.
    menus.bar.handle_focus();
    press(&menus.bar, Key::ArrowDown);
    menus
        .file_menu
        .focus_item(&menus.recent, FocusOrigin::Keyboard);
    press(&menus.file_menu, Key::ArrowRight);
    log::info!("Open menus: {}", stack.len());
    if let Some(recent_menu) = menus.recent.menu_trigger().and_then(|trigger| trigger.menu()) {
        press(&recent_menu, Key::ArrowDown);
        press(&recent_menu, Key::Enter);
    }
    log::info!("Open menus after activation: {}", stack.len());

    // Toggle settings in View with the pointer.
    for item in menus.bar.items() {
        if item.get_label() == "View" {
            menus.bar.handle_click(&item);
        }
    }
    for item in menus.view_menu.items() {
        if matches!(item.get_label().as_str(), "Word Wrap" | "Dark") {
            menus.view_menu.handle_click(&item);
        }
    }

    // A click elsewhere dismisses whatever is still open.
    env.background()
        .handle_pointer_down(&PointerEvent::new(menus.outside));
    log::info!("Open menus after background click: {}", stack.len());

    Ok(())
}
