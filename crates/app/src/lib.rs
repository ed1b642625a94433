//! Declarative panels and keybinding dispatch for sangocui.
//!
//! This crate provides:
//! - `Sangocui` - the controller: loads panels and keybindings, boots the loop
//! - `Renderer` - what subscribers use to act on panels and views
//! - `Subscriber` - components receiving named events
//! - `ViewUpdater` - thread-safe view content updates
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     sangocui (bin)                        │
//! │  main.rs - settings, logger, terminal setup, subscribers │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                 sangocui-app (this crate)                 │
//! │  Sangocui, Renderer, Subscriber, ViewUpdater              │
//! └──────────────────────────────────────────────────────────┘
//!          │             │              │             │
//!          ▼             ▼              ▼             ▼
//!     ┌────────┐   ┌──────────┐   ┌────────┐   ┌──────────┐
//!     │  core  │   │ keyboard │   │ config │   │   gui    │
//!     └────────┘   └──────────┘   └────────┘   └──────────┘
//! ```
//!
//! A key press bound in the keybinding file becomes an action name, and the
//! action is delivered to every registered subscriber in order.

pub mod controller;
pub mod renderer;
pub mod state;
pub mod subscriber;
pub mod updater;

pub use controller::{Phase, Sangocui};
pub use renderer::{create_view, create_views, Renderer};
pub use state::{dispatch, Panels, State};
pub use subscriber::Subscriber;
pub use updater::ViewUpdater;
