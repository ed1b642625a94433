//! The Sangocui controller: configuration, keybinding wiring and boot.

use std::path::Path;

use anyhow::{bail, Context, Result};
use ratatui::{backend::Backend, Terminal};

use sangocui_core::{flatten, KeybindEntry, Panel, ViewKeybinds};
use sangocui_gui::{is_quit, EventSource, Gui, GuiError};
use sangocui_keyboard::lookup_key;

use crate::renderer::{create_views, Renderer};
use crate::state::{dispatch, Panels, State};
use crate::subscriber::Subscriber;
use crate::updater::ViewUpdater;

/// Lifecycle of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, no panels or keybindings yet
    Configuring,
    /// Panels, manager and keybindings installed
    Configured,
    /// Inside `boot`
    Running,
}

/// Owns the terminal, the gui and the panels, and routes key presses to
/// subscribers as named events.
pub struct Sangocui<B: Backend> {
    terminal: Terminal<B>,
    events: Box<dyn EventSource>,
    gui: Gui<State>,
    state: State,
    phase: Phase,
}

impl<B: Backend> Sangocui<B> {
    pub fn new(terminal: Terminal<B>, events: Box<dyn EventSource>) -> Result<Self> {
        let size = terminal.size().context("Failed to read terminal size")?;
        Ok(Self {
            terminal,
            events,
            gui: Gui::new(size.width, size.height),
            state: State::default(),
            phase: Phase::Configuring,
        })
    }

    /// Load panels and keybindings from JSON files and install them.
    pub fn configure(
        &mut self,
        views_path: &Path,
        keybinds_path: &Path,
        default_focus: &str,
    ) -> Result<()> {
        let panels = sangocui_config::load_panels(views_path)?;
        let keybinds = sangocui_config::load_keybinds(keybinds_path)?;
        self.configure_with(panels, keybinds, default_focus)
    }

    /// Install in-memory panel and keybinding declarations.
    ///
    /// Panels are scaled to the current terminal size. Keys outside the
    /// known vocabulary are logged and not bound.
    pub fn configure_with(
        &mut self,
        panels: Vec<Panel>,
        keybinds: Vec<ViewKeybinds>,
        default_focus: &str,
    ) -> Result<()> {
        if self.phase != Phase::Configuring {
            bail!("Sangocui is already configured");
        }
        sangocui_config::validate_panels(&panels)?;

        self.state.panels = Panels::new(panels);
        self.state.default_focus = default_focus.to_string();
        self.state.rescale(self.gui.size());

        self.gui.set_manager(layout);

        for entry in flatten(&keybinds) {
            self.register_keybinding(entry);
        }

        sangocui_logger::info(format!(
            "Configured {} panels, {} keybindings",
            self.state.panels.len(),
            self.gui.keybinding_count()
        ));
        self.phase = Phase::Configured;
        Ok(())
    }

    fn register_keybinding(&mut self, entry: KeybindEntry) {
        let KeybindEntry {
            view_name,
            key,
            action,
        } = entry;

        let Some(chord) = lookup_key(&key) else {
            sangocui_logger::warn(format!(
                "Unknown key {:?} for {} in view {:?}, not bound",
                key, action, view_name
            ));
            return;
        };

        sangocui_logger::info(format!("Registering for {}: {} --- {}", view_name, key, action));
        self.gui
            .set_keybinding(&view_name, chord, move |gui, state, current| {
                sangocui_logger::info(format!(
                    "Dispatch {} in view {}",
                    action,
                    current.unwrap_or("<none>")
                ));
                dispatch(gui, state, &action)
            });
    }

    /// Replace the subscriber list. Order is dispatch order.
    pub fn register_subscribers(&mut self, subscribers: Vec<Box<dyn Subscriber>>) {
        self.state.subscribers = subscribers;
    }

    /// Deliver an event to all subscribers, stopping at the first failure.
    pub fn dispatch(&mut self, event: &str) -> Result<()> {
        dispatch(&mut self.gui, &mut self.state, event)
    }

    /// Dispatch `Launch`, then run the main loop until something quits.
    ///
    /// The quit signal ends `boot` with `Ok`; any other error is returned.
    pub fn boot(&mut self) -> Result<()> {
        match self.phase {
            Phase::Configuring => bail!("Sangocui must be configured before booting"),
            Phase::Running => bail!("Sangocui is already running"),
            Phase::Configured => {}
        }

        self.phase = Phase::Running;
        let result = self.run();
        self.phase = Phase::Configured;

        match result {
            Err(e) if is_quit(&e) => {
                sangocui_logger::info("Quit");
                Ok(())
            }
            other => other,
        }
    }

    fn run(&mut self) -> Result<()> {
        self.dispatch("Launch").context("Launch failed")?;
        self.gui
            .main_loop(&mut self.terminal, self.events.as_mut(), &mut self.state)
    }

    /// The quit signal.
    pub fn quit(&self) -> Result<()> {
        Err(GuiError::Quit.into())
    }

    /// Handle for replacing view content from other threads.
    pub fn updater(&self) -> ViewUpdater {
        ViewUpdater::new(self.gui.update_handle())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn panels(&self) -> &Panels {
        &self.state.panels
    }

    pub fn gui(&self) -> &Gui<State> {
        &self.gui
    }
}

/// Per-frame manager: follow terminal resizes, rebuild the visible views
/// and focus the default view when nothing has focus.
fn layout(gui: &mut Gui<State>, state: &mut State) -> Result<()> {
    state.rescale(gui.size());
    create_views(gui, &state.panels);

    if gui.current_view().is_none() {
        Renderer::new(gui, &mut state.panels)
            .focus(&state.default_focus)
            .with_context(|| format!("Cannot focus default view {}", state.default_focus))?;
    }
    Ok(())
}
