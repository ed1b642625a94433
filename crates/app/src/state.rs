//! Controller state handed to every gui callback.

use anyhow::Result;

use sangocui_core::Panel;
use sangocui_gui::Gui;

use crate::renderer::Renderer;
use crate::subscriber::Subscriber;

/// Loaded panels in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panels {
    items: Vec<Panel>,
}

impl Panels {
    pub fn new(items: Vec<Panel>) -> Self {
        Self { items }
    }

    pub fn get(&self, name: &str) -> Option<&Panel> {
        self.items.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Panel> {
        self.items.iter_mut().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Recompute every absolute rectangle for a terminal of this size.
    pub fn scale(&mut self, max_x: i32, max_y: i32) {
        for panel in &mut self.items {
            panel.coordinate.scale(max_x, max_y);
        }
    }
}

/// Everything the controller owns besides the gui itself.
#[derive(Default)]
pub struct State {
    pub panels: Panels,
    pub subscribers: Vec<Box<dyn Subscriber>>,
    /// View focused whenever nothing else is
    pub default_focus: String,
    /// Terminal size the panels were last scaled for
    pub scaled_for: (i32, i32),
}

impl State {
    pub fn new(panels: Panels, default_focus: impl Into<String>) -> Self {
        Self {
            panels,
            subscribers: Vec::new(),
            default_focus: default_focus.into(),
            scaled_for: (0, 0),
        }
    }

    /// Scale the panels if the terminal size changed since the last call.
    pub fn rescale(&mut self, size: (i32, i32)) {
        if self.scaled_for != size {
            self.panels.scale(size.0, size.1);
            self.scaled_for = size;
        }
    }
}

/// Deliver `event` to every subscriber in registration order.
///
/// Stops at the first subscriber that fails and returns its error.
pub fn dispatch(gui: &mut Gui<State>, state: &mut State, event: &str) -> Result<()> {
    let State {
        panels,
        subscribers,
        ..
    } = state;

    for subscriber in subscribers.iter_mut() {
        let mut ui = Renderer::new(gui, panels);
        subscriber.on(event, &mut ui)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sangocui_core::Coordinate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(
        name: &'static str,
        log: &Rc<RefCell<Vec<String>>>,
        fail: bool,
    ) -> Box<dyn Subscriber> {
        let log = Rc::clone(log);
        Box::new(move |event: &str, _: &mut Renderer<'_>| {
            log.borrow_mut().push(format!("{}:{}", name, event));
            if fail {
                anyhow::bail!("{} refused {}", name, event);
            }
            Ok(())
        })
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut gui = Gui::new(80, 24);
        let mut state = State::default();
        state.subscribers = vec![recorder("a", &log, false), recorder("b", &log, false)];

        dispatch(&mut gui, &mut state, "Launch").unwrap();
        assert_eq!(*log.borrow(), vec!["a:Launch", "b:Launch"]);
    }

    #[test]
    fn test_dispatch_stops_at_first_failure() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut gui = Gui::new(80, 24);
        let mut state = State::default();
        state.subscribers = vec![
            recorder("a", &log, false),
            recorder("b", &log, true),
            recorder("c", &log, false),
        ];

        let err = dispatch(&mut gui, &mut state, "X").unwrap_err();
        assert_eq!(err.to_string(), "b refused X");
        assert_eq!(*log.borrow(), vec!["a:X", "b:X"]);
    }

    #[test]
    fn test_dispatch_without_subscribers() {
        let mut gui = Gui::new(80, 24);
        let mut state = State::default();
        assert!(dispatch(&mut gui, &mut state, "Anything").is_ok());
    }

    #[test]
    fn test_rescale_only_on_size_change() {
        let panel = Panel::new("menu", "Menu", Coordinate::new(0, 0, -10, -2));
        let mut state = State::new(Panels::new(vec![panel]), "menu");

        state.rescale((80, 24));
        let rect = state.panels.get("menu").unwrap().coordinate.absolute();
        assert_eq!((rect.x1, rect.y1), (70, 22));

        state.rescale((100, 30));
        let rect = state.panels.get("menu").unwrap().coordinate.absolute();
        assert_eq!((rect.x1, rect.y1), (90, 28));
        assert_eq!(state.scaled_for, (100, 30));
    }

    #[test]
    fn test_panels_lookup() {
        let mut panels = Panels::new(vec![
            Panel::new("menu", "Menu", Coordinate::default()),
            Panel::new("detail", "Detail", Coordinate::default()),
        ]);
        assert_eq!(panels.len(), 2);
        assert!(panels.get("detail").is_some());
        assert!(panels.get("missing").is_none());
        panels.get_mut("menu").unwrap().hidden = true;
        assert!(panels.get("menu").unwrap().hidden);
        let names: Vec<&str> = panels.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["menu", "detail"]);
    }
}
