//! Relative-to-absolute panel rectangles.

use serde::{Deserialize, Serialize};

/// Top-left and bottom-right corners of a panel.
///
/// The relative fields come from configuration and are offsets from the
/// terminal extent (`max_x + rel`, `max_y + rel`). A relative field of
/// exactly zero is never scaled: its absolute field keeps its previous value.
/// That value is read from configuration too (`topLeftXabs`, ...), so an
/// edge can be pinned at a fixed cell; it defaults to `0`.
///
/// Absolute fields are read but never written back: after scaling they hold
/// terminal-dependent values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "topLeftXrel", alias = "TopLeftXrel", default)]
    pub top_left_x_rel: i32,
    #[serde(rename = "topLeftYrel", alias = "TopLeftYrel", default)]
    pub top_left_y_rel: i32,
    #[serde(rename = "bottomRightXrel", alias = "BottomRightXrel", default)]
    pub bottom_right_x_rel: i32,
    #[serde(rename = "bottomRightYrel", alias = "BottomRightYrel", default)]
    pub bottom_right_y_rel: i32,

    #[serde(rename = "topLeftXabs", alias = "TopLeftXabs", default, skip_serializing)]
    top_left_x_abs: i32,
    #[serde(rename = "topLeftYabs", alias = "TopLeftYabs", default, skip_serializing)]
    top_left_y_abs: i32,
    #[serde(rename = "bottomRightXabs", alias = "BottomRightXabs", default, skip_serializing)]
    bottom_right_x_abs: i32,
    #[serde(rename = "bottomRightYabs", alias = "BottomRightYabs", default, skip_serializing)]
    bottom_right_y_abs: i32,
}

/// Absolute rectangle in terminal cells, corners inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsoluteRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Coordinate {
    /// Create an unscaled coordinate from its relative fields.
    pub fn new(top_left_x_rel: i32, top_left_y_rel: i32, bottom_right_x_rel: i32, bottom_right_y_rel: i32) -> Self {
        Self {
            top_left_x_rel,
            top_left_y_rel,
            bottom_right_x_rel,
            bottom_right_y_rel,
            ..Self::default()
        }
    }

    /// Convert relative offsets to absolute positions for a terminal of
    /// `max_x` columns by `max_y` rows.
    ///
    /// Only non-zero relative fields are applied. Relative fields are never
    /// modified, so calling this again after a resize is safe. Out-of-range
    /// offsets saturate at the `i32` bounds.
    pub fn scale(&mut self, max_x: i32, max_y: i32) {
        if self.top_left_x_rel != 0 {
            self.top_left_x_abs = max_x.saturating_add(self.top_left_x_rel);
        }
        if self.top_left_y_rel != 0 {
            self.top_left_y_abs = max_y.saturating_add(self.top_left_y_rel);
        }
        if self.bottom_right_x_rel != 0 {
            self.bottom_right_x_abs = max_x.saturating_add(self.bottom_right_x_rel);
        }
        if self.bottom_right_y_rel != 0 {
            self.bottom_right_y_abs = max_y.saturating_add(self.bottom_right_y_rel);
        }
    }

    pub fn top_left_abs(&self) -> (i32, i32) {
        (self.top_left_x_abs, self.top_left_y_abs)
    }

    pub fn bottom_right_abs(&self) -> (i32, i32) {
        (self.bottom_right_x_abs, self.bottom_right_y_abs)
    }

    /// The scaled rectangle.
    pub fn absolute(&self) -> AbsoluteRect {
        AbsoluteRect {
            x0: self.top_left_x_abs,
            y0: self.top_left_y_abs,
            x1: self.bottom_right_x_abs,
            y1: self.bottom_right_y_abs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_applies_non_zero_fields() {
        let mut c = Coordinate::new(-40, -10, -1, -2);
        c.scale(120, 40);
        assert_eq!(c.top_left_abs(), (80, 30));
        assert_eq!(c.bottom_right_abs(), (119, 38));
    }

    #[test]
    fn test_scale_leaves_zero_fields_untouched() {
        let mut c = Coordinate::new(0, 0, -1, 0);
        c.scale(80, 24);
        assert_eq!(c.absolute(), AbsoluteRect { x0: 0, y0: 0, x1: 79, y1: 0 });
    }

    #[test]
    fn test_positive_offsets_are_added_too() {
        let mut c = Coordinate::new(5, 3, 10, 6);
        c.scale(80, 24);
        assert_eq!(c.absolute(), AbsoluteRect { x0: 85, y0: 27, x1: 90, y1: 30 });
    }

    #[test]
    fn test_rescale_uses_original_relative_values() {
        let mut c = Coordinate::new(-30, 0, -1, -1);
        c.scale(100, 30);
        c.scale(100, 30);
        assert_eq!(c.absolute(), AbsoluteRect { x0: 70, y0: 0, x1: 99, y1: 29 });

        c.scale(60, 20);
        assert_eq!(c.absolute(), AbsoluteRect { x0: 30, y0: 0, x1: 59, y1: 19 });
        assert_eq!(c.top_left_x_rel, -30);
    }

    #[test]
    fn test_deserialize_defaults_absolute_fields_to_zero() {
        let c: Coordinate = serde_json::from_str(
            r#"{"topLeftXrel": -20, "bottomRightXrel": -1, "bottomRightYrel": -1}"#,
        )
        .unwrap();
        assert_eq!(c.top_left_x_rel, -20);
        assert_eq!(c.top_left_y_rel, 0);
        assert_eq!(c.absolute(), AbsoluteRect::default());
    }

    #[test]
    fn test_configured_absolute_field_pins_zero_edge() {
        let mut c: Coordinate = serde_json::from_str(
            r#"{"topLeftXrel": 0, "topLeftXabs": 5, "topLeftYabs": 2, "bottomRightXrel": -1, "bottomRightYrel": -1}"#,
        )
        .unwrap();
        c.scale(80, 24);
        assert_eq!(c.absolute(), AbsoluteRect { x0: 5, y0: 2, x1: 79, y1: 23 });

        // A non-zero relative field wins over the configured absolute one
        let mut c: Coordinate =
            serde_json::from_str(r#"{"bottomRightXrel": -10, "bottomRightXabs": 3}"#).unwrap();
        c.scale(80, 24);
        assert_eq!(c.bottom_right_abs().0, 70);
    }

    #[test]
    fn test_absolute_fields_are_not_serialized() {
        let mut c = Coordinate::new(-20, 0, -1, -1);
        c.scale(80, 24);
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("topLeftXrel"));
        assert!(!json.contains("abs"));
    }

    #[test]
    fn test_capitalized_field_names() {
        let c: Coordinate = serde_json::from_str(
            r#"{"TopLeftXrel": 0, "TopLeftXabs": 4, "BottomRightXrel": -2, "BottomRightYrel": -1}"#,
        )
        .unwrap();
        assert_eq!(c.bottom_right_x_rel, -2);
        assert_eq!(c.top_left_abs(), (4, 0));
    }

    #[test]
    fn test_scale_saturates_huge_offsets() {
        let mut c = Coordinate::new(i32::MAX, i32::MIN, -1, -1);
        c.scale(80, 24);
        assert_eq!(c.top_left_abs(), (i32::MAX, i32::MIN + 24));
    }
}
