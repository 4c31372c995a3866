// SPDX-License-Identifier: MIT OR Apache-2.0
//! Application-level services for menukit => See the `menukit` crate.

pub mod background;
pub mod settings;

pub use background::{BackgroundCloseService, ShouldCloseMenu};
pub use settings::SettingsRegistry;
