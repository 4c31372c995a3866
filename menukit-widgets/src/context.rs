// SPDX-License-Identifier: MIT OR Apache-2.0
use menukit_core::clock::{SharedClock, SystemClock};
use menukit_core::config::MenuConfig;
use menukit_core::direction::TextDirection;
use menukit_core::element::{ElementArena, ElementTree};
use menukit_core::focus::{FocusManager, SharedFocusManager};
use menukit_core::id::{IdGenerator, ItemId};
use menukit_core::stack::MenuStack;
use menukit_services::background::BackgroundCloseService;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

struct EnvironmentInner {
    config: MenuConfig,
    ids: IdGenerator,
    focus: SharedFocusManager,
    clock: SharedClock,
    direction: Cell<TextDirection>,
    elements: Rc<dyn ElementTree>,
    background: BackgroundCloseService,
}

/// Everything the menus of one application share.
///
/// Clones share the same environment.
#[derive(Clone)]
pub struct MenuEnvironment {
    inner: Rc<EnvironmentInner>,
}

impl MenuEnvironment {
    /// Create an environment with the wall clock and an empty [ElementArena].
    pub fn new(config: MenuConfig) -> Self {
        Self::builder(config).build()
    }

    /// Start configuring an environment.
    pub fn builder(config: MenuConfig) -> MenuEnvironmentBuilder {
        MenuEnvironmentBuilder {
            config,
            ids: None,
            clock: None,
            elements: None,
        }
    }

    /// The resolved configuration.
    pub fn config(&self) -> &MenuConfig {
        &self.inner.config
    }

    /// The id generator.
    pub fn ids(&self) -> &IdGenerator {
        &self.inner.ids
    }

    /// The shared focus manager.
    pub fn focus(&self) -> SharedFocusManager {
        self.inner.focus.clone()
    }

    /// The item that currently holds focus.
    pub fn focused_item(&self) -> Option<ItemId> {
        self.inner.focus.borrow().focused()
    }

    /// The current time according to the environment's clock.
    pub fn now(&self) -> Instant {
        self.inner.clock.now()
    }

    /// The current reading direction.
    pub fn direction(&self) -> TextDirection {
        self.inner.direction.get()
    }

    /// Change the reading direction. Takes effect on the next key event.
    pub fn set_direction(&self, direction: TextDirection) {
        self.inner.direction.set(direction);
    }

    /// The host element tree.
    pub fn elements(&self) -> &Rc<dyn ElementTree> {
        &self.inner.elements
    }

    /// The background close service.
    pub fn background(&self) -> &BackgroundCloseService {
        &self.inner.background
    }

    /// Start a new menu tree with its own stack.
    pub fn new_tree(&self) -> MenuContext {
        MenuContext {
            env: self.clone(),
            stack: MenuStack::new(),
        }
    }
}

impl fmt::Debug for MenuEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuEnvironment")
            .field("config", &self.inner.config)
            .field("direction", &self.inner.direction.get())
            .finish_non_exhaustive()
    }
}

/// Builder for [MenuEnvironment].
pub struct MenuEnvironmentBuilder {
    config: MenuConfig,
    ids: Option<IdGenerator>,
    clock: Option<SharedClock>,
    elements: Option<Rc<dyn ElementTree>>,
}

impl MenuEnvironmentBuilder {
    /// Use a specific id generator.
    pub fn ids(mut self, ids: IdGenerator) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Use a specific clock.
    pub fn clock(mut self, clock: SharedClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use the host's element tree.
    pub fn elements(mut self, elements: Rc<dyn ElementTree>) -> Self {
        self.elements = Some(elements);
        self
    }

    /// Build the environment.
    pub fn build(self) -> MenuEnvironment {
        let direction = self.config.text_direction;
        let clock: SharedClock = match self.clock {
            Some(clock) => clock,
            None => Rc::new(SystemClock),
        };
        let elements: Rc<dyn ElementTree> = match self.elements {
            Some(elements) => elements,
            None => Rc::new(ElementArena::new()),
        };

        MenuEnvironment {
            inner: Rc::new(EnvironmentInner {
                config: self.config,
                ids: self.ids.unwrap_or_default(),
                focus: FocusManager::shared(),
                clock,
                direction: Cell::new(direction),
                elements,
                background: BackgroundCloseService::new(),
            }),
        }
    }
}

/// The environment plus the stack of one menu tree.
///
/// Every container built from the same context shares its stack.
#[derive(Clone, Debug)]
pub struct MenuContext {
    env: MenuEnvironment,
    stack: MenuStack,
}

impl MenuContext {
    /// The application environment.
    pub fn env(&self) -> &MenuEnvironment {
        &self.env
    }

    /// The tree's stack.
    pub fn stack(&self) -> &MenuStack {
        &self.stack
    }

    pub(crate) fn set_stack(&mut self, stack: MenuStack) {
        self.stack = stack;
    }
}
