// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::id::MenuId;
use thiserror::Error;

/// Errors that can occur while building or configuring menus.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// A popup menu was built without the panel that owns it.
    #[error("Incorrect or missing menu panel for a popup menu")]
    MissingMenuPanel,

    /// A stack item was pushed while an equal item was already on the stack.
    #[error("Menu {menu} is already on the menu stack")]
    DuplicateStackItem {
        /// The menu that was pushed twice.
        menu: MenuId,
    },

    /// A configuration document could not be parsed.
    #[error("Failed to parse menu configuration: {details}")]
    ConfigParse {
        /// Parser message.
        details: String,
    },
}

/// Result type for menu operations.
pub type MenuResult<T> = Result<T, MenuError>;

impl MenuError {
    /// Create a configuration parse error.
    pub fn config_parse(details: impl Into<String>) -> Self {
        Self::ConfigParse {
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MenuError::MissingMenuPanel.to_string(),
            "Incorrect or missing menu panel for a popup menu"
        );
        assert_eq!(
            MenuError::DuplicateStackItem { menu: MenuId(3) }.to_string(),
            "Menu menu#3 is already on the menu stack"
        );
        assert!(MenuError::config_parse("bad key")
            .to_string()
            .ends_with("bad key"));
    }
}
