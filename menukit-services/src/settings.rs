// SPDX-License-Identifier: MIT OR Apache-2.0
use anyhow::Result;
use menukit_core::config::{MenuConfig, MenuSettings};
use smol::fs;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

const XDG_PREFIX: &str = "menukit";
const CONFIG_FILE: &str = "menu.toml";

/// Registry for the menu settings of an application.
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    settings: MenuSettings,
}

impl SettingsRegistry {
    /// Create a registry holding only the defaults.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Create a new SettingsRegistry and load `menu.toml` from standard locations.
    pub async fn new() -> Result<Self> {
        let mut registry = Self::with_defaults();
        registry.load().await?;
        Ok(registry)
    }

    /// Load configuration from standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/menukit/menu.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/xdg/menukit/menu.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/menukit/menu.toml (XDG_CONFIG_HOME)
    pub async fn load(&mut self) -> Result<()> {
        let xdg_dirs = BaseDirectories::with_prefix(XDG_PREFIX)?;

        for path in xdg_dirs.find_data_files(CONFIG_FILE).rev() {
            self.load_file(&path).await;
        }

        for path in xdg_dirs.find_config_files(CONFIG_FILE).rev() {
            self.load_file(&path).await;
        }

        let user_config_path = xdg_dirs.get_config_home().join(CONFIG_FILE);
        if user_config_path.exists() {
            self.load_file(&user_config_path).await;
        }

        Ok(())
    }

    async fn load_file(&mut self, path: &Path) {
        log::info!("Loading menu config from: {:?}", path);
        match fs::read_to_string(path).await {
            Ok(content) => match MenuSettings::from_toml(&content) {
                Ok(loaded) => self.merge(loaded),
                Err(e) => {
                    log::error!("Failed to parse menu config {:?}: {}", path, e);
                }
            },
            Err(e) => {
                log::warn!("Failed to read menu config {:?}: {}", path, e);
            }
        }
    }

    /// Merge loaded settings into the current settings.
    pub fn merge(&mut self, other: MenuSettings) {
        self.settings.merge(other);
    }

    /// Get the current settings as loaded.
    pub fn get(&self) -> &MenuSettings {
        &self.settings
    }

    /// Get the resolved configuration.
    pub fn config(&self) -> MenuConfig {
        self.settings.resolve()
    }

    /// Load configuration from multiple custom paths asynchronously.
    ///
    /// Every path yields its own result. Files that fail leave the settings untouched.
    pub async fn load_from_paths_async(&mut self, paths: Vec<PathBuf>) -> Vec<Result<()>> {
        let mut results = Vec::new();

        for path in paths {
            let result = async {
                let content = fs::read_to_string(&path)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to read menu config {:?}: {}", path, e))?;

                let loaded = MenuSettings::from_toml(&content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse menu config {:?}: {}", path, e))?;

                self.merge(loaded);
                Ok(())
            }
            .await;

            results.push(result);
        }

        results
    }

    /// Reload configuration asynchronously (re-runs the full load process).
    pub async fn reload_async(&mut self) -> Result<()> {
        *self = Self::with_defaults();
        self.load().await
    }
}
