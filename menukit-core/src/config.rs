// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::direction::{Orientation, TextDirection};
use crate::error::{MenuError, MenuResult};
use serde::Deserialize;
use std::time::Duration;

/// Resolved configuration shared by every menu of an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    /// How long typing has to pause before the type-ahead prefix is applied.
    pub type_ahead_debounce_ms: u64,
    /// Element tags or classes marking label content as an icon.
    pub icon_markers: Vec<String>,
    /// Initial reading direction.
    pub text_direction: TextDirection,
    /// Orientation of menubars.
    pub bar_orientation: Orientation,
    /// Orientation of popup and inline menus.
    pub menu_orientation: Orientation,
    /// If arrow navigation wraps around at either end.
    pub wrap_navigation: bool,
    /// If activating a plain item closes the whole menu tree.
    pub close_on_activate: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            type_ahead_debounce_ms: 200,
            icon_markers: vec!["icon".to_string(), "mat-icon".to_string()],
            text_direction: TextDirection::Ltr,
            bar_orientation: Orientation::Horizontal,
            menu_orientation: Orientation::Vertical,
            wrap_navigation: true,
            close_on_activate: true,
        }
    }
}

impl MenuConfig {
    /// Parse a `menu.toml` document on top of the defaults.
    pub fn from_toml(source: &str) -> MenuResult<Self> {
        Ok(MenuSettings::from_toml(source)?.resolve())
    }

    /// The type-ahead debounce interval.
    pub fn type_ahead_debounce(&self) -> Duration {
        Duration::from_millis(self.type_ahead_debounce_ms)
    }

    /// Returns if an element tag or class marks icon content.
    pub fn is_icon_marker(&self, name: &str) -> bool {
        self.icon_markers.iter().any(|marker| marker == name)
    }
}

/// The `[navigation]` table of `menu.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NavigationSettings {
    /// See [MenuConfig::wrap_navigation].
    pub wrap: Option<bool>,
    /// See [MenuConfig::type_ahead_debounce_ms].
    pub type_ahead_debounce_ms: Option<u64>,
    /// See [MenuConfig::close_on_activate].
    pub close_on_activate: Option<bool>,
}

/// The `[layout]` table of `menu.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LayoutSettings {
    /// See [MenuConfig::text_direction].
    pub text_direction: Option<TextDirection>,
    /// See [MenuConfig::bar_orientation].
    pub bar_orientation: Option<Orientation>,
    /// See [MenuConfig::menu_orientation].
    pub menu_orientation: Option<Orientation>,
}

/// The `[labels]` table of `menu.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LabelSettings {
    /// See [MenuConfig::icon_markers].
    pub icon_markers: Option<Vec<String>>,
}

/// One `menu.toml` document. Unset keys fall through to earlier documents, then
/// to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MenuSettings {
    /// Keyboard navigation options.
    #[serde(default)]
    pub navigation: NavigationSettings,
    /// Layout options.
    #[serde(default)]
    pub layout: LayoutSettings,
    /// Label options.
    #[serde(default)]
    pub labels: LabelSettings,
}

impl MenuSettings {
    /// Parse a document.
    pub fn from_toml(source: &str) -> MenuResult<Self> {
        toml::from_str(source).map_err(|err| MenuError::config_parse(err.to_string()))
    }

    /// Overlay `other` on top of `self`. Keys set in `other` win.
    pub fn merge(&mut self, other: MenuSettings) {
        let MenuSettings {
            navigation,
            layout,
            labels,
        } = other;

        if navigation.wrap.is_some() {
            self.navigation.wrap = navigation.wrap;
        }
        if navigation.type_ahead_debounce_ms.is_some() {
            self.navigation.type_ahead_debounce_ms = navigation.type_ahead_debounce_ms;
        }
        if navigation.close_on_activate.is_some() {
            self.navigation.close_on_activate = navigation.close_on_activate;
        }
        if layout.text_direction.is_some() {
            self.layout.text_direction = layout.text_direction;
        }
        if layout.bar_orientation.is_some() {
            self.layout.bar_orientation = layout.bar_orientation;
        }
        if layout.menu_orientation.is_some() {
            self.layout.menu_orientation = layout.menu_orientation;
        }
        if labels.icon_markers.is_some() {
            self.labels.icon_markers = labels.icon_markers;
        }
    }

    /// Fill unset keys with defaults.
    pub fn resolve(&self) -> MenuConfig {
        let defaults = MenuConfig::default();

        MenuConfig {
            type_ahead_debounce_ms: self
                .navigation
                .type_ahead_debounce_ms
                .unwrap_or(defaults.type_ahead_debounce_ms),
            icon_markers: self
                .labels
                .icon_markers
                .clone()
                .unwrap_or(defaults.icon_markers),
            text_direction: self.layout.text_direction.unwrap_or(defaults.text_direction),
            bar_orientation: self.layout.bar_orientation.unwrap_or(defaults.bar_orientation),
            menu_orientation: self
                .layout
                .menu_orientation
                .unwrap_or(defaults.menu_orientation),
            wrap_navigation: self.navigation.wrap.unwrap_or(defaults.wrap_navigation),
            close_on_activate: self
                .navigation
                .close_on_activate
                .unwrap_or(defaults.close_on_activate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_resolves_to_defaults() {
        assert_eq!(MenuConfig::from_toml("").unwrap(), MenuConfig::default());
    }

    #[test]
    fn test_parse_overrides() {
        let config = MenuConfig::from_toml(
            r#"
            [navigation]
            wrap = false
            type_ahead_debounce_ms = 350

            [layout]
            text_direction = "rtl"
            menu_orientation = "horizontal"

            [labels]
            icon_markers = ["glyph"]
            "#,
        )
        .unwrap();

        assert!(!config.wrap_navigation);
        assert_eq!(config.type_ahead_debounce(), Duration::from_millis(350));
        assert!(config.text_direction.is_rtl());
        assert_eq!(config.menu_orientation, Orientation::Horizontal);
        assert_eq!(config.bar_orientation, Orientation::Horizontal);
        assert!(config.is_icon_marker("glyph"));
        assert!(!config.is_icon_marker("icon"));
        assert!(config.close_on_activate);
    }

    #[test]
    fn test_merge_later_wins_only_where_set() {
        let mut base = MenuSettings::from_toml(
            "[navigation]\nwrap = false\ntype_ahead_debounce_ms = 100\n",
        )
        .unwrap();
        let user = MenuSettings::from_toml("[navigation]\ntype_ahead_debounce_ms = 400\n").unwrap();

        base.merge(user);
        let config = base.resolve();

        assert!(!config.wrap_navigation);
        assert_eq!(config.type_ahead_debounce_ms, 400);
    }

    #[test]
    fn test_invalid_document_is_config_error() {
        let err = MenuConfig::from_toml("[layout]\ntext_direction = \"sideways\"\n").unwrap_err();
        assert!(matches!(err, MenuError::ConfigParse { .. }));
    }
}
