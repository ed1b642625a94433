//! Panel and keybinding declaration files (JSON).

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::Path;

use sangocui_core::{Panel, ViewKeybinds};

/// Parse a JSON array of panel declarations.
///
/// Panel names are keys into the panel collection and must be unique.
pub fn parse_panels(content: &str) -> Result<Vec<Panel>> {
    let panels: Vec<Panel> =
        serde_json::from_str(content).context("Invalid panel declarations")?;
    validate_panels(&panels)?;
    Ok(panels)
}

/// Check that every panel has a non-empty, unique name.
pub fn validate_panels(panels: &[Panel]) -> Result<()> {
    let mut seen = HashSet::new();
    for panel in panels {
        if panel.name.is_empty() {
            bail!("Panel declaration with an empty name (title: {:?})", panel.title);
        }
        if !seen.insert(panel.name.as_str()) {
            bail!("Duplicate panel name: {}", panel.name);
        }
    }
    Ok(())
}

/// Load panel declarations from a JSON file.
pub fn load_panels(path: &Path) -> Result<Vec<Panel>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read panel config {}", path.display()))?;
    parse_panels(&content).with_context(|| format!("Failed to load {}", path.display()))
}

/// Parse a JSON array of per-view keybinding declarations.
pub fn parse_keybinds(content: &str) -> Result<Vec<ViewKeybinds>> {
    serde_json::from_str(content).context("Invalid keybinding declarations")
}

/// Load keybinding declarations from a JSON file.
pub fn load_keybinds(path: &Path) -> Result<Vec<ViewKeybinds>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read keybind config {}", path.display()))?;
    parse_keybinds(&content).with_context(|| format!("Failed to load {}", path.display()))
}
