//! Core types for sangocui panels.
//!
//! This crate holds the declarative data model: where a panel sits on the
//! screen, how it is highlighted, and which keys route to which actions.
//! It has no terminal dependency; the backend and controller crates build
//! on top of it.

pub mod coordinate;
pub mod keybind;
pub mod panel;
pub mod selection;

pub use coordinate::{AbsoluteRect, Coordinate};
pub use keybind::{flatten, KeyAction, KeybindEntry, ViewKeybinds};
pub use panel::Panel;
pub use selection::SelectionColor;
