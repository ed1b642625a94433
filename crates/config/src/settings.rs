//! Configuration structures for sangocui settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application settings with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,

    /// UI and declaration file settings
    #[serde(default)]
    pub ui: UiSettings,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional, defaults to the cache directory)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Number of entries kept in memory for the log panel
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

/// UI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Input poll interval; queued view updates are applied at least this often
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Panel declaration file
    #[serde(default = "default_views_path")]
    pub views_path: String,

    /// Keybinding declaration file
    #[serde(default = "default_keybinds_path")]
    pub keybinds_path: String,

    /// View focused at startup and whenever no view holds focus
    #[serde(default = "default_focus")]
    pub default_focus: String,
}

// Default value functions for serde
fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

fn default_tick_rate_ms() -> u64 {
    defaults::TICK_RATE_MS
}

fn default_views_path() -> String {
    defaults::VIEWS_PATH.to_string()
}

fn default_keybinds_path() -> String {
    defaults::KEYBINDS_PATH.to_string()
}

fn default_focus() -> String {
    defaults::DEFAULT_FOCUS.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            views_path: default_views_path(),
            keybinds_path: default_keybinds_path(),
            default_focus: default_focus(),
        }
    }
}
