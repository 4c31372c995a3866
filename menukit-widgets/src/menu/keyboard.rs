// SPDX-License-Identifier: MIT OR Apache-2.0
use super::{Menu, MenuRole, SubmenuFocus};
use menukit_core::event::{Key, KeyEvent, KeyHandling};
use menukit_core::focus::FocusOrigin;
use menukit_core::stack::FocusNext;

impl Menu {
    /// Handle a key press while focus is inside this menu.
    ///
    /// Returns [KeyHandling::Handled] when the host should suppress its default
    /// handling of the key.
    pub fn handle_key(&self, event: &KeyEvent) -> KeyHandling {
        log::trace!("Menu {} got {:?}", self.id, event);

        let horizontal = self.orientation.is_horizontal();
        let navigation = matches!(
            event.key,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight | Key::Home | Key::End
        );
        if navigation && event.has_modifier() {
            return KeyHandling::Propagate;
        }

        match event.key {
            Key::ArrowUp | Key::ArrowDown => {
                let down = event.key == Key::ArrowDown;
                if horizontal {
                    let focus = if down {
                        SubmenuFocus::First
                    } else {
                        SubmenuFocus::Last
                    };
                    if let Some(item) = self.active_item() {
                        self.open_submenu(&item, Some(focus));
                    }
                } else {
                    self.move_active(down);
                }
                KeyHandling::Handled
            }
            Key::ArrowLeft | Key::ArrowRight => {
                let forward = (event.key == Key::ArrowRight) != self.env().direction().is_rtl();
                if horizontal {
                    self.move_active(forward);
                    KeyHandling::Handled
                } else if forward {
                    self.expand_or_advance()
                } else {
                    self.collapse_or_retreat()
                }
            }
            Key::Home => {
                self.focus_first_item(FocusOrigin::Keyboard);
                KeyHandling::Handled
            }
            Key::End => {
                self.focus_last_item(FocusOrigin::Keyboard);
                KeyHandling::Handled
            }
            Key::Enter | Key::Space => {
                self.activate_active_item();
                KeyHandling::Handled
            }
            Key::Escape if event.has_modifier() => KeyHandling::Propagate,
            Key::Escape => self.close_on_escape(),
            Key::Tab => {
                self.stack().close_all(FocusNext::None);
                KeyHandling::Propagate
            }
            Key::Character(_) => match event.type_ahead_char() {
                Some(c) => {
                    self.push_type_ahead(c);
                    KeyHandling::Handled
                }
                None => KeyHandling::Propagate,
            },
            Key::Other => KeyHandling::Propagate,
        }
    }

    /// Apply the type-ahead prefix once typing has paused for the debounce interval.
    /// Returns if focus moved.
    pub fn poll_type_ahead(&self) -> bool {
        let now = self.env().now();
        let ready = self.type_ahead.borrow_mut().take_ready(now);
        match ready {
            Some(prefix) => self.apply_type_ahead(&prefix),
            None => false,
        }
    }

    /// Returns if typed characters are waiting for the debounce interval.
    pub fn has_pending_type_ahead(&self) -> bool {
        self.type_ahead.borrow().is_pending()
    }

    fn push_type_ahead(&self, c: char) {
        let now = self.env().now();
        let settled = self.type_ahead.borrow_mut().push(c, now);
        if let Some(prefix) = settled {
            self.apply_type_ahead(&prefix);
        }
    }

    fn apply_type_ahead(&self, prefix: &str) -> bool {
        let items = self.items();
        let found = self.keys.borrow_mut().find_by_prefix(&items, prefix);
        log::trace!("Type-ahead {:?} in menu {} matched {:?}", prefix, self.id, found);

        match found.and_then(|index| items.get(index)) {
            Some(item) => {
                self.focus_item(item, FocusOrigin::Keyboard);
                true
            }
            None => false,
        }
    }

    /// Move the active item along the menu's axis. In a bar that shows a submenu,
    /// the submenu follows the active item.
    fn move_active(&self, forward: bool) {
        let reopen = self.role == MenuRole::Bar && self.close_open_submenu();

        let items = self.items();
        let index = {
            let mut keys = self.keys.borrow_mut();
            if forward {
                keys.next(&items)
            } else {
                keys.previous(&items)
            }
        };
        let Some(item) = index.and_then(|index| items.get(index).cloned()) else {
            return;
        };

        self.focus_item(&item, FocusOrigin::Keyboard);
        if reopen && item.has_menu() {
            self.open_submenu(&item, None);
        }
    }

    fn expand_or_advance(&self) -> KeyHandling {
        let Some(item) = self.active_item() else {
            return KeyHandling::Propagate;
        };

        if item.has_menu() {
            self.open_submenu(&item, Some(SubmenuFocus::First));
            return KeyHandling::Handled;
        }

        if self.role == MenuRole::Popup {
            self.stack().close_all(FocusNext::NextItem);
            return KeyHandling::Handled;
        }

        KeyHandling::Propagate
    }

    fn collapse_or_retreat(&self) -> KeyHandling {
        if self.role != MenuRole::Popup {
            return KeyHandling::Propagate;
        }

        let stack = self.stack();
        if stack.len() > 1 {
            stack.close(&self.stack_item(), FocusNext::CurrentItem);
        } else {
            stack.close_all(FocusNext::PreviousItem);
        }
        KeyHandling::Handled
    }

    fn activate_active_item(&self) {
        let Some(item) = self.active_item() else {
            return;
        };
        if item.is_disabled() {
            return;
        }

        match item.menu_trigger() {
            Some(trigger) => {
                trigger.toggle();
                if trigger.is_open() {
                    if let Some(menu) = trigger.menu() {
                        menu.focus_first_item(FocusOrigin::Keyboard);
                    }
                }
            }
            None => item.trigger(),
        }
    }

    fn close_on_escape(&self) -> KeyHandling {
        if self.role == MenuRole::Popup {
            self.stack().close(&self.stack_item(), FocusNext::CurrentItem);
            return KeyHandling::Handled;
        }

        if self.close_open_submenu() {
            KeyHandling::Handled
        } else {
            KeyHandling::Propagate
        }
    }
}
