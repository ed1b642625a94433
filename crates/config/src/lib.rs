//! Configuration management for sangocui.
//!
//! Two kinds of configuration live here:
//! - `Settings`: the application settings file (TOML, XDG config directory)
//! - panel and keybinding declarations (JSON files named by the application)

mod declarations;
mod settings;
mod xdg;

pub use declarations::{
    load_keybinds, load_panels, parse_keybinds, parse_panels, validate_panels,
};
pub use settings::{LoggingSettings, Settings, UiSettings};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 500;
    pub const TICK_RATE_MS: u64 = 100;
    pub const VIEWS_PATH: &str = "assets/panels.json";
    pub const KEYBINDS_PATH: &str = "assets/keybinds.json";
    pub const DEFAULT_FOCUS: &str = "menu";
    pub const LOG_FILE_NAME: &str = "sangocui.log";
}

impl Settings {
    /// Load settings from the XDG config directory.
    ///
    /// On first run, creates the file with default values.
    /// Auto-completes missing keys with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load settings from an explicit path, with the same first-run and
    /// normalization behavior as [`Settings::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(path)?;
            return Ok(settings);
        }

        let original_content = std::fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&original_content)?;

        // Rewrite when keys were missing or formatting differs
        let normalized_content = toml::to_string_pretty(&settings)?;
        if original_content != normalized_content {
            settings.save_to(path)?;
        }

        Ok(settings)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get path to settings file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Resolve the log file: the configured path, else the cache directory,
    /// else the system temp directory.
    pub fn log_file_path(&self) -> PathBuf {
        if let Some(ref path) = self.logging.file_path {
            return PathBuf::from(path);
        }
        get_cache_dir()
            .unwrap_or_else(|_| std::env::temp_dir())
            .join(defaults::LOG_FILE_NAME)
    }
}
