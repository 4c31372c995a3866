// SPDX-License-Identifier: MIT OR Apache-2.0
#![warn(missing_docs)]

//! Core library for menukit => See `menukit` crate.
//!
//! Contains the shared state primitives every menu tree is built on: the menu stack,
//! the selection dispatcher, event and focus types, and configuration.

/// Contains the [Clock](clock::Clock) abstraction used for type-ahead debouncing.
pub mod clock;

/// Contains the [MenuConfig](config::MenuConfig) struct and its file representation.
pub mod config;

/// Contains orientation and text direction types.
pub mod direction;

/// Contains the [SelectionDispatcher](dispatcher::SelectionDispatcher).
pub mod dispatcher;

/// Contains host element handles and containment queries.
pub mod element;

/// Contains the [Emitter](emitter::Emitter) event stream and RAII subscriptions.
pub mod emitter;

/// Contains the [MenuError](error::MenuError) type.
pub mod error;

/// Contains keyboard and pointer event types.
pub mod event;

/// Contains focus tracking.
pub mod focus;

/// Contains id types and the scoped [IdGenerator](id::IdGenerator).
pub mod id;

/// Contains list navigation for menu containers.
pub mod key_manager;

/// Contains the [MenuStack](stack::MenuStack).
pub mod stack;

/// Contains the open menu element tracker.
pub mod tracker;

/// Contains the type-ahead buffer.
pub mod type_ahead;
