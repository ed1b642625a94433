//! Panel declarations.

use serde::{Deserialize, Serialize};

use crate::{Coordinate, SelectionColor};

/// A declaratively configured rectangular region of the screen.
///
/// Panels are loaded once at startup. Only `hidden` and the current
/// selection colors change afterwards; the on-screen view is rebuilt from
/// these fields every frame, so the panel is the single source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    /// Unique key of the panel, also used as the view name
    #[serde(alias = "Name")]
    pub name: String,

    /// Text shown in the frame
    #[serde(alias = "Title", default)]
    pub title: String,

    /// Highlight the line under the cursor with the selection colors
    #[serde(alias = "Highlight", default)]
    pub highlight: bool,

    /// Draw a border around the view
    #[serde(alias = "Frame", default)]
    pub frame: bool,

    /// Editor overwrites instead of inserting
    #[serde(alias = "Overwrite", default)]
    pub overwrite: bool,

    /// Excluded from view creation
    #[serde(alias = "Hidden", default)]
    pub hidden: bool,

    /// Key presses not bound to an action edit the view content
    #[serde(alias = "Editable", default)]
    pub editable: bool,

    /// Wrap long lines
    #[serde(alias = "Wrap", default = "default_wrap")]
    pub wrap: bool,

    #[serde(alias = "Coordinate", default)]
    pub coordinate: Coordinate,

    #[serde(alias = "SelectionColor", default)]
    pub selection_color: SelectionColor,
}

fn default_wrap() -> bool {
    true
}

impl Panel {
    /// Create a visible, framed panel with default colors.
    pub fn new(name: impl Into<String>, title: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            highlight: false,
            frame: true,
            overwrite: false,
            hidden: false,
            editable: false,
            wrap: default_wrap(),
            coordinate,
            selection_color: SelectionColor::default(),
        }
    }

    /// Set the current selection colors to the active pair.
    pub fn enable_selection(&mut self) {
        self.selection_color.activate();
    }

    /// Set the current selection colors to the unactive pair.
    pub fn disable_selection(&mut self) {
        self.selection_color.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANEL_JSON: &str = r#"{
        "title": "Menu",
        "name": "menu",
        "highlight": true,
        "frame": true,
        "overwrite": false,
        "hidden": false,
        "editable": false,
        "coordinate": {
            "topLeftXrel": 0, "topLeftYrel": 0,
            "bottomRightXrel": -41, "bottomRightYrel": -4
        },
        "selectionColor": {
            "bgActive": "green", "fgActive": "black",
            "bgUnactive": "default", "fgUnactive": "default",
            "bgCurrent": "default", "fgCurrent": "default"
        }
    }"#;

    #[test]
    fn test_deserialize_panel() {
        let panel: Panel = serde_json::from_str(PANEL_JSON).unwrap();
        assert_eq!(panel.name, "menu");
        assert_eq!(panel.title, "Menu");
        assert!(panel.highlight);
        assert!(panel.frame);
        assert!(!panel.hidden);
        // Absent wrap defaults to true
        assert!(panel.wrap);
        assert_eq!(panel.coordinate.bottom_right_x_rel, -41);
        assert_eq!(panel.selection_color.active(), ("green", "black"));
    }

    #[test]
    fn test_deserialize_minimal_panel() {
        let panel: Panel = serde_json::from_str(r#"{"name": "status"}"#).unwrap();
        assert_eq!(panel.title, "");
        assert!(!panel.frame);
        assert_eq!(panel.coordinate, Coordinate::default());
        assert_eq!(panel.selection_color, SelectionColor::default());
    }

    #[test]
    fn test_capitalized_field_names() {
        let panel: Panel = serde_json::from_str(
            r#"{
                "Title": "Side",
                "Name": "side",
                "Highlight": true,
                "Frame": true,
                "Hidden": true,
                "Coordinate": {"TopLeftXrel": 0, "TopLeftXabs": 2, "BottomRightXrel": -1},
                "SelectionColor": {
                    "BgColorActive": "green", "FgColorActive": "black",
                    "BgColorUnactive": "white", "FgColorUnactive": "black"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(panel.name, "side");
        assert_eq!(panel.title, "Side");
        assert!(panel.highlight && panel.frame && panel.hidden);
        assert_eq!(panel.coordinate.top_left_abs(), (2, 0));
        assert_eq!(panel.selection_color.active(), ("green", "black"));
        assert_eq!(panel.selection_color.current(), ("white", "black"));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        assert!(serde_json::from_str::<Panel>(r#"{"title": "x"}"#).is_err());
    }

    #[test]
    fn test_selection_toggle() {
        let mut panel: Panel = serde_json::from_str(PANEL_JSON).unwrap();
        panel.enable_selection();
        assert_eq!(panel.selection_color.current(), ("green", "black"));
        panel.disable_selection();
        assert_eq!(panel.selection_color.current(), ("default", "default"));
    }
}
