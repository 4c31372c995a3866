// SPDX-License-Identifier: MIT OR Apache-2.0
#![warn(missing_docs)]

//! Headless, keyboard-navigable menus and menubars for Rust UI toolkits.
//!
//! menukit owns the interaction state of a menu tree: which submenus are open,
//! where focus goes when they close, radio and checkbox selection, type-ahead and
//! closing on background clicks. Rendering and event plumbing stay with the host.

pub use menukit_core as core;
pub use menukit_services as services;

/// Widgets module re-exporting the menu components.
pub mod widgets {
    pub use menukit_widgets::*;
}

/// A "prelude" for users of menukit.
///
/// Importing this module brings into scope the most common types
/// needed to build and drive a menu tree.
///
/// ```rust
/// use menukit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::clock::{Clock, ManualClock, SystemClock};
    pub use crate::core::config::MenuConfig;
    pub use crate::core::direction::{Orientation, TextDirection};
    pub use crate::core::dispatcher::SelectionDispatcher;
    pub use crate::core::element::{ElementArena, ElementId, ElementTree};
    pub use crate::core::emitter::{Emitter, Subscription};
    pub use crate::core::error::{MenuError, MenuResult};
    pub use crate::core::event::{Key, KeyEvent, KeyHandling, Modifiers, PointerEvent};
    pub use crate::core::focus::FocusOrigin;
    pub use crate::core::id::{ItemId, MenuId};
    pub use crate::core::stack::{FocusNext, MenuStack, MenuStackItem};

    pub use crate::services::background::BackgroundCloseService;
    pub use crate::services::settings::SettingsRegistry;

    pub use crate::widgets::context::{MenuContext, MenuEnvironment};
    pub use crate::widgets::group::MenuGroup;
    pub use crate::widgets::item::{ItemKind, MenuItem};
    pub use crate::widgets::label::LabelNode;
    pub use crate::widgets::menu::{Menu, MenuRole};
    pub use crate::widgets::trigger::{MenuItemTrigger, MenuPanel};
}
