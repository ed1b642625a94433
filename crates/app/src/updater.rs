//! Content updates submitted through the gui's update queue.

use std::fmt::Write;

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use sangocui_gui::{Gui, UpdateHandle, View};

use crate::state::State;

/// Replaces view content between frames. Usable from any thread.
///
/// Updates addressed to a view that does not exist when they are applied
/// are logged and dropped. Submitting fails only when the gui is gone.
#[derive(Clone)]
pub struct ViewUpdater {
    handle: UpdateHandle<State>,
}

impl ViewUpdater {
    pub(crate) fn new(handle: UpdateHandle<State>) -> Self {
        Self { handle }
    }

    /// Replace the content of `view` with one line per item, each padded
    /// to the view width so the highlighted line spans the whole row.
    pub fn update_list_view<I, S>(&self, view: &str, items: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = items.into_iter().map(Into::into).collect();
        self.submit(view, move |v| write_list(v, &lines))
    }

    /// Replace the content of `view` with `text`.
    pub fn update_text_view(&self, view: &str, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.submit(view, move |v| {
            v.clear();
            writeln!(v, "{}", text)?;
            Ok(())
        })
    }

    fn submit<F>(&self, view: &str, apply: F) -> Result<()>
    where
        F: FnOnce(&mut View) -> Result<()> + Send + 'static,
    {
        let name = view.to_string();
        self.handle.update(move |gui: &mut Gui<State>| {
            match gui.view_mut(&name) {
                Ok(v) => apply(v),
                Err(_) => {
                    sangocui_logger::warn(format!("Dropping update for unknown view {}", name));
                    Ok(())
                }
            }
        })?;
        Ok(())
    }
}

fn write_list(view: &mut View, lines: &[String]) -> Result<()> {
    view.clear();
    let (width, _) = view.size();
    for line in lines {
        let pad = width.saturating_sub(line.width());
        writeln!(view, "{}{}", line, " ".repeat(pad))?;
    }
    Ok(())
}
