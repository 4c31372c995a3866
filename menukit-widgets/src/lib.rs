// SPDX-License-Identifier: MIT OR Apache-2.0
#![warn(missing_docs)]

//! Menu components for menukit => See the `menukit` crate.
//!
//! Contains the containers (menubar, inline and popup menus), their items and
//! submenu triggers, and the environment they share.

/// Contains the [MenuEnvironment](context::MenuEnvironment) and [MenuContext](context::MenuContext).
pub mod context;

/// Contains the [MenuGroup](group::MenuGroup) component.
pub mod group;

/// Contains the [MenuItem](item::MenuItem) component.
pub mod item;

/// Contains label content and text extraction.
pub mod label;

/// Contains the [Menu](menu::Menu) container.
pub mod menu;

/// Contains the [MenuItemTrigger](trigger::MenuItemTrigger) and [MenuPanel](trigger::MenuPanel).
pub mod trigger;
