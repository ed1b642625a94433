//! Keybinding declarations.

use serde::{Deserialize, Serialize};

/// A key name bound to an action name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAction {
    #[serde(alias = "Key")]
    pub key: String,
    #[serde(alias = "Action")]
    pub action: String,
}

/// All keybindings declared for one view, in declaration order.
///
/// An empty `view_name` declares global bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewKeybinds {
    #[serde(alias = "ViewName")]
    pub view_name: String,
    #[serde(default, alias = "Keybinds")]
    pub keybinds: Vec<KeyAction>,
}

/// Flattened `(view, key, action)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindEntry {
    pub view_name: String,
    pub key: String,
    pub action: String,
}

impl ViewKeybinds {
    pub fn new(view_name: impl Into<String>) -> Self {
        Self {
            view_name: view_name.into(),
            keybinds: Vec::new(),
        }
    }

    /// Builder-style helper to append a binding.
    pub fn bind(mut self, key: impl Into<String>, action: impl Into<String>) -> Self {
        self.keybinds.push(KeyAction {
            key: key.into(),
            action: action.into(),
        });
        self
    }

    /// Iterate over this view's bindings as flat entries.
    pub fn entries(&self) -> impl Iterator<Item = KeybindEntry> + '_ {
        self.keybinds.iter().map(|kb| KeybindEntry {
            view_name: self.view_name.clone(),
            key: kb.key.clone(),
            action: kb.action.clone(),
        })
    }
}

/// Flatten grouped declarations, preserving file order.
pub fn flatten(groups: &[ViewKeybinds]) -> Vec<KeybindEntry> {
    groups.iter().flat_map(|group| group.entries()).collect()
}
