//! Demo subscribers for the bundled panel and keybinding files.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;

use sangocui_app::{Renderer, Subscriber, ViewUpdater};

const MENU: &str = "menu";
const DETAIL: &str = "detail";
const STATUS: &str = "status";
const HELP: &str = "help";
const LOGS: &str = "logs";

const TOPICS: &[(&str, &str)] = &[
    (
        "Panels",
        "Panels are declared in a JSON file: a name, a title, display flags,\n\
         a coordinate relative to the terminal edges and selection colors.\n\
         Each visible panel becomes a view on every frame.",
    ),
    (
        "Keybindings",
        "Keybindings map a key name on a view to an action name.\n\
         An empty view name binds the key everywhere.\n\
         Actions are delivered to every subscriber in order.",
    ),
    (
        "Subscribers",
        "A subscriber receives every action by name and decides what to do.\n\
         The first subscriber that fails stops the delivery.",
    ),
    (
        "Updates",
        "Other threads change view content through an updater.\n\
         The status line below is refreshed by one every second.",
    ),
];

const HELP_TEXT: &str = "Up/Down   move in the focused list\n\
                         Right     focus the detail panel\n\
                         Left      back to the menu\n\
                         Enter     show the selected topic\n\
                         Ctrl+P    toggle this help\n\
                         Ctrl+L    toggle the log panel\n\
                         Ctrl+C    quit";

/// Drives the menu and detail panels and the help/log overlays.
#[derive(Debug, Default)]
pub struct Navigator;

impl Navigator {
    fn selected_topic(ui: &Renderer<'_>) -> Option<&'static (&'static str, &'static str)> {
        let line = ui.current_line(MENU)?;
        let title = line.trim_end();
        TOPICS.iter().find(|(name, _)| *name == title)
    }

    fn show_selected(ui: &mut Renderer<'_>) -> Result<()> {
        if let Some((_, text)) = Self::selected_topic(ui) {
            ui.update_text_view(DETAIL, *text)?;
        }
        Ok(())
    }

    fn toggle(ui: &mut Renderer<'_>, view: &str) -> bool {
        let hidden = ui.panel(view).is_some_and(|p| p.hidden);
        if hidden {
            ui.show(view);
        } else {
            ui.hide(view);
        }
        hidden
    }
}

impl Subscriber for Navigator {
    fn on(&mut self, event: &str, ui: &mut Renderer<'_>) -> Result<()> {
        match event {
            "Launch" => {
                ui.update_list_view(MENU, TOPICS.iter().map(|(name, _)| *name))?;
                ui.update_text_view(DETAIL, TOPICS[0].1)?;
                ui.enable_selection(MENU);
            }
            "MenuDown" => {
                ui.cursor_down(MENU)?;
                Self::show_selected(ui)?;
            }
            "MenuUp" => {
                ui.cursor_up(MENU)?;
                Self::show_selected(ui)?;
            }
            "MenuSelect" => Self::show_selected(ui)?,
            "DetailDown" => ui.cursor_down(DETAIL)?,
            "DetailUp" => ui.cursor_up(DETAIL)?,
            "FocusDetail" => {
                ui.disable_selection(MENU);
                ui.enable_selection(DETAIL);
                ui.reset_cursor(DETAIL)?;
                ui.focus(DETAIL)?;
            }
            "FocusMenu" => {
                ui.disable_selection(DETAIL);
                ui.enable_selection(MENU);
                ui.focus(MENU)?;
            }
            "ToggleHelp" => {
                if Self::toggle(ui, HELP) {
                    ui.update_text_view(HELP, HELP_TEXT)?;
                }
            }
            "ToggleLogs" => {
                if Self::toggle(ui, LOGS) {
                    let lines = sangocui_logger::get_entries()
                        .iter()
                        .rev()
                        .map(|entry| entry.to_line())
                        .collect::<Vec<_>>();
                    ui.update_list_view(LOGS, lines)?;
                }
            }
            "Quit" => return ui.quit(),
            _ => {}
        }
        Ok(())
    }
}

/// Refresh the status line every second until the gui is gone.
pub fn spawn_clock(updater: ViewUpdater) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        let text = format!(
            " {}  |  Ctrl+P help  Ctrl+L logs  Ctrl+C quit",
            Local::now().format("%H:%M:%S")
        );
        if updater.update_text_view(STATUS, text).is_err() {
            break;
        }
        thread::sleep(Duration::from_secs(1));
    })
}

/// Subscribers for the bundled configuration, in dispatch order.
pub fn subscribers() -> Vec<Box<dyn Subscriber>> {
    vec![
        Box::new(|event: &str, _: &mut Renderer<'_>| -> Result<()> {
            sangocui_logger::debug(format!("Event {}", event));
            Ok(())
        }),
        Box::new(Navigator),
    ]
}
