//! Terminal backend for sangocui.
//!
//! Named rectangular views drawn with ratatui, keybindings scoped to a view
//! or global, a per-frame layout manager and an update queue that other
//! threads use to mutate views between frames.

mod error;
mod event;
mod gui;
pub mod terminal;
mod view;

pub use error::{is_quit, is_unknown_view, GuiError};
pub use event::{Event, EventHandler, EventScript, EventSource};
pub use gui::{Gui, KeybindingHandler, Manager, SetView, Update, UpdateHandle};
pub use view::{Color, View};
