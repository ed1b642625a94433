//! Panels to views, and the operations subscribers use on them.

use anyhow::Result;

use sangocui_core::Panel;
use sangocui_gui::{Gui, GuiError, SetView, View};
use sangocui_keyboard::color_code_of;

use crate::state::{Panels, State};
use crate::updater::ViewUpdater;

/// Create or refresh the view for `panel`.
///
/// The panel's flags, title and current selection colors are copied onto
/// the view on every call. Returns `None` when the backend refuses the
/// rectangle.
pub fn create_view<'g, C>(gui: &'g mut Gui<C>, panel: &Panel) -> Option<&'g mut View> {
    let rect = panel.coordinate.absolute();
    let view = match gui.set_view(&panel.name, rect.x0, rect.y0, rect.x1, rect.y1) {
        Ok(outcome @ SetView::Created(_)) => {
            sangocui_logger::debug(format!("Created view {}", panel.name));
            outcome.into_view()
        }
        Ok(outcome) => outcome.into_view(),
        Err(e) => {
            sangocui_logger::debug(format!("No view for panel {}: {}", panel.name, e));
            return None;
        }
    };

    let (sel_bg, sel_fg) = panel.selection_color.current();
    view.sel_bg_color = color_code_of(sel_bg);
    view.sel_fg_color = color_code_of(sel_fg);
    view.highlight = panel.highlight;
    view.frame = panel.frame;
    view.title.clone_from(&panel.title);
    view.editable = panel.editable;
    view.wrap = panel.wrap;
    view.overwrite = panel.overwrite;

    Some(view)
}

/// Create or refresh a view for every visible panel, in panel order.
///
/// Returns the names of the views produced.
pub fn create_views<C>(gui: &mut Gui<C>, panels: &Panels) -> Vec<String> {
    panels
        .iter()
        .filter(|panel| !panel.hidden)
        .filter_map(|panel| create_view(gui, panel).map(|view| view.name().to_string()))
        .collect()
}

/// Subscriber-side access to the panels and their views.
///
/// Operations addressed to a panel or view that does not exist are no-ops,
/// except [`Renderer::focus`] and [`Renderer::current_buffer`], where a bad
/// name is a programming error.
pub struct Renderer<'a> {
    gui: &'a mut Gui<State>,
    panels: &'a mut Panels,
}

impl<'a> Renderer<'a> {
    pub fn new(gui: &'a mut Gui<State>, panels: &'a mut Panels) -> Self {
        Self { gui, panels }
    }

    /// Create or refresh every visible view.
    pub fn create_views(&mut self) -> Vec<String> {
        create_views(self.gui, self.panels)
    }

    /// Replace the content of a view with padded lines on the next frame.
    pub fn update_list_view<I, S>(&self, view: &str, items: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.updater().update_list_view(view, items)
    }

    /// Replace the content of a view with text on the next frame.
    pub fn update_text_view(&self, view: &str, text: impl Into<String>) -> Result<()> {
        self.updater().update_text_view(view, text)
    }

    /// Handle for submitting content updates from other threads.
    pub fn updater(&self) -> ViewUpdater {
        ViewUpdater::new(self.gui.update_handle())
    }

    /// Move the cursor one line down, scrolling when it is on the last row.
    ///
    /// Does nothing when there is no line below the cursor.
    pub fn cursor_down(&mut self, view: &str) -> Result<()> {
        let Ok(v) = self.gui.view_mut(view) else {
            sangocui_logger::debug(format!("cursor_down: unknown view {}", view));
            return Ok(());
        };

        let (cx, cy) = v.cursor();
        if v.line(cy + 1).is_none() {
            return Ok(());
        }
        if v.set_cursor(cx, cy + 1).is_err() {
            let (ox, oy) = v.origin();
            v.set_origin(ox, oy + 1)?;
        }
        v.scroll_to_cursor();
        Ok(())
    }

    /// Move the cursor one line up, scrolling when it is on the first row.
    pub fn cursor_up(&mut self, view: &str) -> Result<()> {
        let Ok(v) = self.gui.view_mut(view) else {
            sangocui_logger::debug(format!("cursor_up: unknown view {}", view));
            return Ok(());
        };

        let (ox, oy) = v.origin();
        let (cx, cy) = v.cursor();
        if cy > 0 && v.set_cursor(cx, cy - 1).is_ok() {
            return Ok(());
        }
        if oy > 0 {
            v.set_origin(ox, oy - 1)?;
        }
        Ok(())
    }

    /// Put the cursor back on the first cell.
    pub fn reset_cursor(&mut self, view: &str) -> Result<()> {
        let Ok(v) = self.gui.view_mut(view) else {
            sangocui_logger::debug(format!("reset_cursor: unknown view {}", view));
            return Ok(());
        };
        v.set_cursor(0, 0)?;
        Ok(())
    }

    /// Make a hidden panel visible again and rebuild the views.
    pub fn show(&mut self, view: &str) {
        let Some(panel) = self.panels.get_mut(view) else {
            sangocui_logger::warn(format!("show: unknown panel {}", view));
            return;
        };
        panel.hidden = false;
        self.create_views();
    }

    /// Hide a panel and remove its view.
    pub fn hide(&mut self, view: &str) {
        let Some(panel) = self.panels.get_mut(view) else {
            sangocui_logger::warn(format!("hide: unknown panel {}", view));
            return;
        };
        panel.hidden = true;
        match self.gui.delete_view(view) {
            // Never drawn yet
            Ok(()) | Err(GuiError::UnknownView(_)) => {}
            Err(e) => sangocui_logger::warn(format!("hide: cannot delete view {}: {}", view, e)),
        }
    }

    /// Send keyboard input to a view. An unknown view is fatal.
    pub fn focus(&mut self, view: &str) -> Result<()> {
        if let Err(e) = self.gui.set_current_view(view) {
            sangocui_logger::error(format!("Cannot focus {}: {}", view, e));
            return Err(e.into());
        }
        Ok(())
    }

    /// Highlight with the panel's active colors from the next frame on.
    pub fn enable_selection(&mut self, view: &str) {
        if let Some(panel) = self.panels.get_mut(view) {
            panel.enable_selection();
        }
    }

    /// Highlight with the panel's unactive colors from the next frame on.
    pub fn disable_selection(&mut self, view: &str) {
        if let Some(panel) = self.panels.get_mut(view) {
            panel.disable_selection();
        }
    }

    /// Whole content of a view. An unknown view is an error.
    pub fn current_buffer(&self, view: &str) -> Result<String> {
        Ok(self.gui.view(view)?.buffer())
    }

    /// Line under the cursor of a view.
    pub fn current_line(&self, view: &str) -> Option<String> {
        self.gui.view(view).ok()?.current_line().map(str::to_string)
    }

    /// Name of the focused view.
    pub fn current_view(&self) -> Option<&str> {
        self.gui.current_view_name()
    }

    pub fn panel(&self, name: &str) -> Option<&Panel> {
        self.panels.get(name)
    }

    pub fn view(&self, name: &str) -> Option<&View> {
        self.gui.view(name).ok()
    }

    pub fn view_mut(&mut self, name: &str) -> Option<&mut View> {
        self.gui.view_mut(name).ok()
    }

    /// The quit signal: returning it from a subscriber ends the main loop.
    pub fn quit(&self) -> Result<()> {
        Err(GuiError::Quit.into())
    }
}
