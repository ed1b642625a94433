//! Selection colors of a panel.

use serde::{Deserialize, Serialize};

/// Background/foreground color names used for the highlighted line.
///
/// The current pair always mirrors either the active or the unactive pair.
/// Deserialization restores that invariant: a configured current pair that
/// matches neither is reset to the unactive pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectionColorConfig", into = "SelectionColorConfig")]
pub struct SelectionColor {
    bg_active: String,
    fg_active: String,
    bg_unactive: String,
    fg_unactive: String,
    bg_current: String,
    fg_current: String,
}

/// Serialized form. Accepts the short (`bgActive`) and the long
/// (`bgColorActive`) key spellings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SelectionColorConfig {
    #[serde(rename = "bgActive", alias = "bgColorActive", alias = "BgColorActive")]
    bg_active: String,
    #[serde(rename = "fgActive", alias = "fgColorActive", alias = "FgColorActive")]
    fg_active: String,
    #[serde(rename = "bgUnactive", alias = "bgColorUnactive", alias = "BgColorUnactive")]
    bg_unactive: String,
    #[serde(rename = "fgUnactive", alias = "fgColorUnactive", alias = "FgColorUnactive")]
    fg_unactive: String,
    #[serde(rename = "bgCurrent", alias = "bgColorCurrent", alias = "BgColorCurrent")]
    bg_current: String,
    #[serde(rename = "fgCurrent", alias = "fgColorCurrent", alias = "FgColorCurrent")]
    fg_current: String,
}

impl From<SelectionColorConfig> for SelectionColor {
    fn from(raw: SelectionColorConfig) -> Self {
        let mut colors = SelectionColor {
            bg_active: raw.bg_active,
            fg_active: raw.fg_active,
            bg_unactive: raw.bg_unactive,
            fg_unactive: raw.fg_unactive,
            bg_current: raw.bg_current,
            fg_current: raw.fg_current,
        };
        if !colors.is_active() {
            colors.deactivate();
        }
        colors
    }
}

impl From<SelectionColor> for SelectionColorConfig {
    fn from(colors: SelectionColor) -> Self {
        SelectionColorConfig {
            bg_active: colors.bg_active,
            fg_active: colors.fg_active,
            bg_unactive: colors.bg_unactive,
            fg_unactive: colors.fg_unactive,
            bg_current: colors.bg_current,
            fg_current: colors.fg_current,
        }
    }
}

impl Default for SelectionColor {
    fn default() -> Self {
        Self::new(("green", "black"), ("default", "default"))
    }
}

impl SelectionColor {
    /// Create colors from `(bg, fg)` pairs; the current pair starts unactive.
    pub fn new(active: (&str, &str), unactive: (&str, &str)) -> Self {
        Self {
            bg_active: active.0.to_string(),
            fg_active: active.1.to_string(),
            bg_unactive: unactive.0.to_string(),
            fg_unactive: unactive.1.to_string(),
            bg_current: unactive.0.to_string(),
            fg_current: unactive.1.to_string(),
        }
    }

    /// Copy the active pair into the current pair.
    pub fn activate(&mut self) {
        self.bg_current.clone_from(&self.bg_active);
        self.fg_current.clone_from(&self.fg_active);
    }

    /// Copy the unactive pair into the current pair.
    pub fn deactivate(&mut self) {
        self.bg_current.clone_from(&self.bg_unactive);
        self.fg_current.clone_from(&self.fg_unactive);
    }

    /// Whether the current pair mirrors the active pair.
    pub fn is_active(&self) -> bool {
        self.bg_current == self.bg_active && self.fg_current == self.fg_active
    }

    pub fn active(&self) -> (&str, &str) {
        (&self.bg_active, &self.fg_active)
    }

    pub fn unactive(&self) -> (&str, &str) {
        (&self.bg_unactive, &self.fg_unactive)
    }

    /// Current `(bg, fg)` color names.
    pub fn current(&self) -> (&str, &str) {
        (&self.bg_current, &self.fg_current)
    }
}
