//! Key and color name mapping.
//!
//! Configuration files name keys (`"ctrlC"`, `"arrowDown"`) and colors
//! (`"green"`, `"default"`). This crate translates that closed vocabulary
//! into crossterm key chords and ratatui colors with explicit tables.
//!
//! The total functions [`key_code_of`] and [`color_code_of`] never fail:
//! unknown names degrade to a fixed fallback. Callers that need to tell an
//! unmapped name from a real one use [`lookup_key`] / [`lookup_color`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;

/// A key code plus the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    /// Key without modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Ctrl + character.
    pub const fn ctrl(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Check whether a key event from the terminal triggers this chord.
    ///
    /// Ctrl+character chords ignore Shift and letter case: terminals with
    /// keyboard enhancement report Ctrl+Shift+C, others fold it into Ctrl+C.
    /// Every other chord needs its exact modifiers.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        match (self.code, key.code) {
            (KeyCode::Char(expected), KeyCode::Char(actual))
                if self.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                key.modifiers.difference(KeyModifiers::SHIFT) == self.modifiers
                    && expected.eq_ignore_ascii_case(&actual)
            }
            (expected, actual) => key.modifiers == self.modifiers && expected == actual,
        }
    }
}

impl From<KeyChord> for KeyEvent {
    fn from(chord: KeyChord) -> Self {
        KeyEvent::new(chord.code, chord.modifiers)
    }
}

/// Chord returned for unrecognized key names.
pub const FALLBACK_KEY: KeyChord = KeyChord::ctrl('2');

/// Color returned for unrecognized color names.
pub const FALLBACK_COLOR: Color = Color::Black;

const KEY_TABLE: &[(&str, KeyChord)] = &[
    ("ctrlC", KeyChord::ctrl('c')),
    ("arrowUp", KeyChord::plain(KeyCode::Up)),
    ("arrowDown", KeyChord::plain(KeyCode::Down)),
    ("arrowRight", KeyChord::plain(KeyCode::Right)),
    ("arrowLeft", KeyChord::plain(KeyCode::Left)),
    ("ctrlD", KeyChord::ctrl('d')),
    ("ctrlP", KeyChord::ctrl('p')),
    ("ctrlSpace", KeyChord::ctrl(' ')),
    ("ctrlF", KeyChord::ctrl('f')),
    ("ctrlB", KeyChord::ctrl('b')),
    ("ctrlA", KeyChord::ctrl('a')),
    ("enter", KeyChord::plain(KeyCode::Enter)),
    ("ctrlL", KeyChord::ctrl('l')),
];

const COLOR_TABLE: &[(&str, Color)] = &[
    ("green", Color::Green),
    ("black", Color::Black),
    ("white", Color::White),
    ("default", Color::Reset),
];

/// Every key name understood by [`key_code_of`], in table order.
pub const KEY_NAMES: [&str; 13] = [
    "ctrlC",
    "arrowUp",
    "arrowDown",
    "arrowRight",
    "arrowLeft",
    "ctrlD",
    "ctrlP",
    "ctrlSpace",
    "ctrlF",
    "ctrlB",
    "ctrlA",
    "enter",
    "ctrlL",
];

/// Every color name understood by [`color_code_of`], in table order.
pub const COLOR_NAMES: [&str; 4] = ["green", "black", "white", "default"];

/// Look up a key name; `None` if it is not in the vocabulary.
pub fn lookup_key(name: &str) -> Option<KeyChord> {
    KEY_TABLE
        .iter()
        .find(|(key_name, _)| *key_name == name)
        .map(|(_, chord)| *chord)
}

/// Map a key name to its chord, or [`FALLBACK_KEY`] if unknown.
pub fn key_code_of(name: &str) -> KeyChord {
    lookup_key(name).unwrap_or(FALLBACK_KEY)
}

/// Look up a color name; `None` if it is not in the vocabulary.
pub fn lookup_color(name: &str) -> Option<Color> {
    COLOR_TABLE
        .iter()
        .find(|(color_name, _)| *color_name == name)
        .map(|(_, color)| *color)
}

/// Map a color name to its terminal color, or [`FALLBACK_COLOR`] if unknown.
pub fn color_code_of(name: &str) -> Color {
    lookup_color(name).unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_name_is_mapped() {
        for name in KEY_NAMES {
            assert!(lookup_key(name).is_some(), "{name} should be mapped");
        }
        assert_eq!(KEY_NAMES.len(), KEY_TABLE.len());
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(key_code_of("ctrlC"), KeyChord::ctrl('c'));
        assert_eq!(key_code_of("arrowDown"), KeyChord::plain(KeyCode::Down));
        assert_eq!(key_code_of("arrowLeft"), KeyChord::plain(KeyCode::Left));
        assert_eq!(key_code_of("enter"), KeyChord::plain(KeyCode::Enter));
        assert_eq!(key_code_of("ctrlSpace"), KeyChord::ctrl(' '));
    }

    #[test]
    fn test_unknown_key_falls_back() {
        assert_eq!(key_code_of("ctrlZ"), FALLBACK_KEY);
        assert_eq!(key_code_of(""), FALLBACK_KEY);
        // Lookup is case-sensitive, like the table
        assert_eq!(key_code_of("CtrlC"), FALLBACK_KEY);
        assert!(lookup_key("ctrlZ").is_none());
    }

    #[test]
    fn test_fallback_is_not_in_vocabulary() {
        assert!(KEY_TABLE.iter().all(|(_, chord)| *chord != FALLBACK_KEY));
    }

    #[test]
    fn test_color_codes() {
        assert_eq!(color_code_of("green"), Color::Green);
        assert_eq!(color_code_of("black"), Color::Black);
        assert_eq!(color_code_of("white"), Color::White);
        assert_eq!(color_code_of("default"), Color::Reset);
        for name in COLOR_NAMES {
            assert!(lookup_color(name).is_some());
        }
    }

    #[test]
    fn test_unknown_color_falls_back() {
        assert_eq!(color_code_of("purple"), FALLBACK_COLOR);
        assert_eq!(color_code_of("Green"), FALLBACK_COLOR);
        assert!(lookup_color("").is_none());
    }

    #[test]
    fn test_chord_matches_key_event() {
        let chord = key_code_of("ctrlF");
        assert!(chord.matches(&KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL)));
        assert!(chord.matches(&KeyEvent::new(KeyCode::Char('F'), KeyModifiers::CONTROL)));
        assert!(!chord.matches(&KeyEvent::new(KeyCode::Char('f'), KeyModifiers::NONE)));
        assert!(!chord.matches(&KeyEvent::new(KeyCode::Char('b'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_ctrl_chord_ignores_shift() {
        let chord = key_code_of("ctrlC");
        let shifted = KeyModifiers::CONTROL | KeyModifiers::SHIFT;
        assert!(chord.matches(&KeyEvent::new(KeyCode::Char('C'), shifted)));
        assert!(chord.matches(&KeyEvent::new(KeyCode::Char('c'), shifted)));
        // Other modifiers still count
        let alt = KeyModifiers::CONTROL | KeyModifiers::ALT;
        assert!(!chord.matches(&KeyEvent::new(KeyCode::Char('c'), alt)));
    }

    #[test]
    fn test_plain_chord_requires_no_modifiers() {
        let chord = key_code_of("arrowUp");
        assert!(chord.matches(&KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)));
        assert!(!chord.matches(&KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_chord_into_key_event() {
        let event: KeyEvent = KeyChord::ctrl('l').into();
        assert_eq!(event.code, KeyCode::Char('l'));
        assert_eq!(event.modifiers, KeyModifiers::CONTROL);
    }
}
