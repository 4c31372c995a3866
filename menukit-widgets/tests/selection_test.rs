// SPDX-License-Identifier: MIT OR Apache-2.0
mod common;

use common::environment;
use menukit_core::config::MenuConfig;
use menukit_core::dispatcher::SelectionDispatcher;
use menukit_core::id::ItemId;
use menukit_widgets::group::MenuGroup;
use menukit_widgets::item::MenuItem;
use menukit_widgets::menu::Menu;
use std::cell::RefCell;
use std::rc::Rc;

fn record(emitter: &menukit_core::emitter::Emitter<Rc<MenuItem>>) -> (Rc<RefCell<Vec<ItemId>>>, menukit_core::emitter::Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let subscription = {
        let seen = seen.clone();
        emitter.subscribe(move |item| seen.borrow_mut().push(item.id()))
    };
    (seen, subscription)
}

#[test]
fn test_checkboxes_toggle_independently() {
    let (env, _clock, _arena) = environment(MenuConfig::default());
    let menu = Menu::inline(&env.new_tree()).build().unwrap();
    let bold = MenuItem::checkbox(&env, "Bold");
    let italic = MenuItem::checkbox(&env, "Italic");
    menu.add_item(bold.clone());
    menu.add_item(italic.clone());
    let (changes, _sub) = record(menu.change());

    bold.trigger();
    assert!(bold.is_checked());
    assert!(!italic.is_checked());
    assert_eq!(*changes.borrow(), vec![bold.id()]);

    italic.trigger();
    assert!(bold.is_checked());
    assert!(italic.is_checked());
    assert_eq!(*changes.borrow(), vec![bold.id(), italic.id()]);
}

#[test]
fn test_radios_with_shared_name_are_exclusive() {
    let (env, _clock, _arena) = environment(MenuConfig::default());
    let menu = Menu::inline(&env.new_tree()).build().unwrap();
    let small = MenuItem::builder(&env).radio().label("Small").name("group1").build();
    let large = MenuItem::builder(&env)
        .radio()
        .label("Large")
        .name("group1")
        .checked(true)
        .build();
    menu.add_item(small.clone());
    menu.add_item(large.clone());

    small.trigger();
    assert!(small.is_checked());
    assert!(!large.is_checked());

    large.trigger();
    assert!(!small.is_checked());
    assert!(large.is_checked());
    assert_eq!(large.aria_checked(), Some("true"));
    assert_eq!(large.role(), "menuitemradio");
}

#[test]
fn test_radio_checked_only_for_exact_pair() {
    let (env, _clock, _arena) = environment(MenuConfig::default());
    let menu = Menu::inline(&env.new_tree()).build().unwrap();
    let radio = MenuItem::builder(&env)
        .radio()
        .name("size")
        .selectable_id("small")
        .checked(true)
        .build();
    menu.add_item(radio.clone());

    menu.dispatcher().notify("small", "color");
    assert!(!radio.is_checked());

    menu.dispatcher().notify("small", "size");
    assert!(radio.is_checked());
}

#[test]
fn test_disabled_radio_is_not_selected() {
    let (env, _clock, _arena) = environment(MenuConfig::default());
    let menu = Menu::inline(&env.new_tree()).build().unwrap();
    let radio = MenuItem::builder(&env).radio().disabled(true).build();
    menu.add_item(radio.clone());
    let (changes, _sub) = record(menu.change());

    radio.trigger();
    menu.handle_click(&radio);

    assert!(!radio.is_checked());
    assert!(changes.borrow().is_empty());
}

#[test]
fn test_group_reports_changes_instead_of_menu() {
    let (env, _clock, _arena) = environment(MenuConfig::default());
    let menu = Menu::inline(&env.new_tree()).build().unwrap();
    let group = MenuGroup::new();
    let wrap = MenuItem::checkbox(&env, "Word wrap");
    group.add_item(wrap.clone());
    let (menu_changes, _menu_sub) = record(menu.change());
    let (group_changes, _group_sub) = record(group.change());

    menu.add_group(group.clone());
    let ruler = MenuItem::checkbox(&env, "Ruler");
    menu.add_item(ruler.clone());
    wrap.trigger();
    ruler.trigger();

    assert!(menu.change().is_closed());
    assert!(menu_changes.borrow().is_empty());
    assert_eq!(*group_changes.borrow(), vec![wrap.id()]);
    assert_eq!(menu.items().len(), 2);
    assert!(Rc::ptr_eq(&wrap.parent_menu().unwrap(), &menu));
}

#[test]
fn test_groups_scope_radio_selection() {
    let (env, _clock, _arena) = environment(MenuConfig::default());
    let menu = Menu::inline(&env.new_tree()).build().unwrap();
    let fonts = MenuGroup::new();
    let sizes = MenuGroup::new();
    let serif = MenuItem::builder(&env).radio().name("choice").selectable_id("a").build();
    let sans = MenuItem::builder(&env).radio().name("choice").selectable_id("b").build();
    let small = MenuItem::builder(&env)
        .radio()
        .name("choice")
        .selectable_id("a")
        .checked(true)
        .build();
    fonts.add_item(serif.clone());
    fonts.add_item(sans.clone());
    sizes.add_item(small.clone());
    menu.add_group(fonts);
    menu.add_group(sizes);

    sans.trigger();

    assert!(sans.is_checked());
    assert!(!serif.is_checked());
    assert!(small.is_checked());
}

#[test]
fn test_injected_dispatcher_links_groups() {
    let (env, _clock, _arena) = environment(MenuConfig::default());
    let shared = SelectionDispatcher::new();
    let left = MenuGroup::with_dispatcher(shared.clone());
    let right = MenuGroup::with_dispatcher(shared.clone());
    let first = MenuItem::builder(&env).radio().name("align").build();
    let second = MenuItem::builder(&env).radio().name("align").build();
    left.add_item(first.clone());
    right.add_item(second.clone());

    first.trigger();
    second.trigger();

    assert!(!first.is_checked());
    assert!(second.is_checked());
    assert_eq!(shared.listener_count(), 2);
}

#[test]
fn test_items_added_after_group_joins_navigation() {
    let (env, _clock, _arena) = environment(MenuConfig::default());
    let menu = Menu::inline(&env.new_tree()).build().unwrap();
    let group = MenuGroup::new();
    menu.add_group(group.clone());

    let late = MenuItem::checkbox(&env, "Late");
    group.add_item(late.clone());

    assert_eq!(menu.items().len(), 1);
    assert!(Rc::ptr_eq(&group.menu().unwrap(), &menu));
    assert!(late.parent_menu().is_some());
}

#[test]
fn test_unmounted_radio_stops_listening() {
    let (env, _clock, _arena) = environment(MenuConfig::default());
    let dispatcher = SelectionDispatcher::new();
    let group = MenuGroup::with_dispatcher(dispatcher.clone());
    group.add_item(MenuItem::radio(&env, "Temporary"));
    assert_eq!(dispatcher.listener_count(), 1);

    drop(group);

    assert_eq!(dispatcher.listener_count(), 0);
}

#[test]
fn test_removed_items_stop_reporting() {
    let (env, _clock, _arena) = environment(MenuConfig::default());
    let menu = Menu::inline(&env.new_tree()).build().unwrap();
    let wrap = MenuItem::checkbox(&env, "Wrap");
    let mono = MenuItem::radio(&env, "Mono");
    menu.add_item(wrap.clone());
    menu.add_item(mono.clone());
    let (changes, _sub) = record(menu.change());
    assert_eq!(menu.dispatcher().listener_count(), 1);

    menu.remove_item(&wrap);
    menu.remove_item(&mono);
    wrap.trigger();
    mono.trigger();

    assert!(changes.borrow().is_empty());
    assert_eq!(menu.dispatcher().listener_count(), 0);
    assert!(wrap.parent_menu().is_none());
    assert!(mono.parent_menu().is_none());
    assert!(menu.items().is_empty());
    assert!(wrap.is_checked());
    assert!(mono.is_checked());
}

#[test]
fn test_removed_group_member_leaves_group() {
    let (env, _clock, _arena) = environment(MenuConfig::default());
    let menu = Menu::inline(&env.new_tree()).build().unwrap();
    let group = MenuGroup::new();
    let small = MenuItem::radio(&env, "Small");
    let large = MenuItem::radio(&env, "Large");
    group.add_item(small.clone());
    group.add_item(large.clone());
    menu.add_group(group.clone());
    let (changes, _sub) = record(group.change());

    menu.remove_item(&small);
    small.trigger();
    large.trigger();

    assert_eq!(group.items().len(), 1);
    assert_eq!(group.dispatcher().listener_count(), 1);
    assert_eq!(*changes.borrow(), vec![large.id()]);
    assert!(small.is_checked());
    assert!(large.is_checked());
}
