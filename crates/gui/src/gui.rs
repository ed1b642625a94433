//! The view manager and its main loop.

use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{backend::Backend, layout::Rect, Frame, Terminal};

use sangocui_keyboard::KeyChord;

use crate::event::{Event, EventSource};
use crate::view::View;
use crate::GuiError;

/// Keybinding callback: receives the gui, the caller's context and the name
/// of the view that had focus when the key was pressed.
pub type KeybindingHandler<C> = Box<dyn FnMut(&mut Gui<C>, &mut C, Option<&str>) -> Result<()>>;

/// Per-frame callback that lays out the views.
pub type Manager<C> = Box<dyn FnMut(&mut Gui<C>, &mut C) -> Result<()>>;

/// Mutation submitted through the update queue.
pub type Update<C> = Box<dyn FnOnce(&mut Gui<C>) -> Result<()> + Send>;

struct Keybinding<C> {
    /// Empty for bindings that fire whatever view is focused
    view_name: String,
    chord: KeyChord,
    handler: KeybindingHandler<C>,
}

/// Outcome of [`Gui::set_view`].
#[derive(Debug)]
pub enum SetView<'a> {
    /// No view had that name; a fresh one was created.
    Created(&'a mut View),
    /// The existing view was moved to the given rectangle.
    Updated(&'a mut View),
}

impl<'a> SetView<'a> {
    pub fn into_view(self) -> &'a mut View {
        match self {
            SetView::Created(view) | SetView::Updated(view) => view,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, SetView::Created(_))
    }
}

/// Sending side of the update queue. Cheap to clone, usable from any thread.
pub struct UpdateHandle<C> {
    tx: Sender<Update<C>>,
}

impl<C> Clone for UpdateHandle<C> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<C> UpdateHandle<C> {
    /// Queue a mutation for the main loop.
    pub fn update<F>(&self, f: F) -> Result<(), GuiError>
    where
        F: FnOnce(&mut Gui<C>) -> Result<()> + Send + 'static,
    {
        self.tx.send(Box::new(f)).map_err(|_| GuiError::Closed)
    }
}

/// Named views, keybindings, a layout manager and a serialized update queue.
///
/// `C` is the context handed to keybinding handlers and the manager, so the
/// application state that reacts to input can live outside the gui.
pub struct Gui<C> {
    width: u16,
    height: u16,
    /// Creation order, which is also drawing order
    views: Vec<View>,
    current: Option<String>,
    keybindings: Vec<Keybinding<C>>,
    manager: Option<Manager<C>>,
    update_tx: Sender<Update<C>>,
    update_rx: Receiver<Update<C>>,
}

impl<C> Gui<C> {
    pub fn new(width: u16, height: u16) -> Self {
        let (update_tx, update_rx) = mpsc::channel();
        Self {
            width,
            height,
            views: Vec::new(),
            current: None,
            keybindings: Vec::new(),
            manager: None,
            update_tx,
            update_rx,
        }
    }

    /// Terminal width and height.
    pub fn size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Create the view `name` or move the existing one to a new rectangle.
    pub fn set_view(
        &mut self,
        name: &str,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> Result<SetView<'_>, GuiError> {
        if x0 >= x1 || y0 >= y1 {
            return Err(GuiError::InvalidDimensions {
                name: name.to_string(),
                x0,
                y0,
                x1,
                y1,
            });
        }

        match self.views.iter().position(|v| v.name() == name) {
            Some(idx) => {
                let view = &mut self.views[idx];
                view.set_dimensions(x0, y0, x1, y1);
                Ok(SetView::Updated(view))
            }
            None => {
                self.views.push(View::new(name, x0, y0, x1, y1));
                let idx = self.views.len() - 1;
                Ok(SetView::Created(&mut self.views[idx]))
            }
        }
    }

    pub fn view(&self, name: &str) -> Result<&View, GuiError> {
        self.views
            .iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| GuiError::UnknownView(name.to_string()))
    }

    pub fn view_mut(&mut self, name: &str) -> Result<&mut View, GuiError> {
        self.views
            .iter_mut()
            .find(|v| v.name() == name)
            .ok_or_else(|| GuiError::UnknownView(name.to_string()))
    }

    /// Remove a view. Removing the focused view leaves nothing focused.
    pub fn delete_view(&mut self, name: &str) -> Result<(), GuiError> {
        let idx = self
            .views
            .iter()
            .position(|v| v.name() == name)
            .ok_or_else(|| GuiError::UnknownView(name.to_string()))?;
        self.views.remove(idx);
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        Ok(())
    }

    /// Give input focus to a view.
    pub fn set_current_view(&mut self, name: &str) -> Result<&mut View, GuiError> {
        let idx = self
            .views
            .iter()
            .position(|v| v.name() == name)
            .ok_or_else(|| GuiError::UnknownView(name.to_string()))?;
        self.current = Some(name.to_string());
        Ok(&mut self.views[idx])
    }

    pub fn current_view(&self) -> Option<&View> {
        let name = self.current.as_deref()?;
        self.views.iter().find(|v| v.name() == name)
    }

    pub fn current_view_mut(&mut self) -> Option<&mut View> {
        let name = self.current.as_deref()?;
        self.views.iter_mut().find(|v| v.name() == name)
    }

    pub fn current_view_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// View names in drawing order.
    pub fn view_names(&self) -> impl Iterator<Item = &str> {
        self.views.iter().map(View::name)
    }

    // ========================================================================
    // Keybindings
    // ========================================================================

    /// Bind a key on a view. An empty `view_name` binds it globally.
    pub fn set_keybinding<F>(&mut self, view_name: &str, chord: KeyChord, handler: F)
    where
        F: FnMut(&mut Gui<C>, &mut C, Option<&str>) -> Result<()> + 'static,
    {
        self.keybindings.push(Keybinding {
            view_name: view_name.to_string(),
            chord,
            handler: Box::new(handler),
        });
    }

    pub fn keybinding_count(&self) -> usize {
        self.keybindings.len()
    }

    /// Run every binding matching `key` in registration order.
    ///
    /// If nothing matched and the focused view is editable, the key goes to
    /// its editor. Returns whether the key was consumed. The first handler
    /// error stops the remaining handlers and is returned.
    pub fn handle_key(&mut self, key: &KeyEvent, ctx: &mut C) -> Result<bool> {
        let current = self.current.clone();
        let mut bindings = std::mem::take(&mut self.keybindings);

        let mut matched = false;
        let mut result = Ok(());
        for binding in bindings.iter_mut() {
            let scoped = binding.view_name.is_empty()
                || current.as_deref() == Some(binding.view_name.as_str());
            if !scoped || !binding.chord.matches(key) {
                continue;
            }
            matched = true;
            result = (binding.handler)(self, ctx, current.as_deref());
            if result.is_err() {
                break;
            }
        }

        // Bindings registered by a handler go after the existing ones
        bindings.append(&mut self.keybindings);
        self.keybindings = bindings;
        result?;

        if matched {
            return Ok(true);
        }
        match self.current_view_mut() {
            Some(view) if view.editable => Ok(view.edit(key)),
            _ => Ok(false),
        }
    }

    // ========================================================================
    // Layout
    // ========================================================================

    pub fn set_manager<F>(&mut self, manager: F)
    where
        F: FnMut(&mut Gui<C>, &mut C) -> Result<()> + 'static,
    {
        self.manager = Some(Box::new(manager));
    }

    /// Run the manager once.
    pub fn layout(&mut self, ctx: &mut C) -> Result<()> {
        let Some(mut manager) = self.manager.take() else {
            return Ok(());
        };
        let result = manager(self, ctx);
        // A manager installed from inside the manager wins
        if self.manager.is_none() {
            self.manager = Some(manager);
        }
        result
    }

    // ========================================================================
    // Update queue
    // ========================================================================

    /// Queue a mutation for the next loop iteration.
    pub fn update<F>(&self, f: F) -> Result<(), GuiError>
    where
        F: FnOnce(&mut Gui<C>) -> Result<()> + Send + 'static,
    {
        self.update_tx.send(Box::new(f)).map_err(|_| GuiError::Closed)
    }

    pub fn update_handle(&self) -> UpdateHandle<C> {
        UpdateHandle {
            tx: self.update_tx.clone(),
        }
    }

    /// Apply every queued mutation in submission order.
    ///
    /// Returns how many were applied; stops at the first failing one.
    pub fn flush_updates(&mut self) -> Result<usize> {
        let mut applied = 0;
        while let Ok(update) = self.update_rx.try_recv() {
            update(self)?;
            applied += 1;
        }
        Ok(applied)
    }

    // ========================================================================
    // Drawing and the main loop
    // ========================================================================

    /// Draw all views in creation order.
    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let current = self.current.as_deref();

        for view in &self.views {
            view.render(area, frame.buffer_mut(), current == Some(view.name()));
        }

        if let Some(view) = self.current_view() {
            if view.editable {
                if let Some(position) = view.cursor_screen_position(area) {
                    frame.set_cursor_position(position);
                }
            }
        }
    }

    /// Run until a callback fails.
    ///
    /// Each iteration runs the manager, applies queued updates to the views
    /// it produced, draws and then waits for one event. The loop only ends with an error;
    /// [`GuiError::Quit`] is the clean exit (see [`crate::is_quit`]).
    pub fn main_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut dyn EventSource,
        ctx: &mut C,
    ) -> Result<()> {
        let size = terminal.size()?;
        self.resize(size.width, size.height);

        loop {
            self.layout(ctx)?;
            self.flush_updates()?;
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    self.handle_key(&key, ctx)?;
                }
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                    self.resize(width, height);
                }
                Event::Tick => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventScript;
    use crate::is_quit;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::fmt::Write;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_set_view_created_then_updated() {
        let mut gui: Gui<()> = Gui::new(80, 24);
        assert!(gui.set_view("menu", 0, 0, 10, 5).unwrap().is_created());

        let outcome = gui.set_view("menu", 1, 1, 20, 10).unwrap();
        assert!(!outcome.is_created());
        assert_eq!(outcome.into_view().dimensions(), (1, 1, 20, 10));
        assert_eq!(gui.view_names().collect::<Vec<_>>(), vec!["menu"]);
    }

    #[test]
    fn test_set_view_keeps_content() {
        let mut gui: Gui<()> = Gui::new(80, 24);
        let view = gui.set_view("menu", 0, 0, 10, 5).unwrap().into_view();
        writeln!(view, "kept").unwrap();

        gui.set_view("menu", 0, 0, 30, 5).unwrap();
        assert_eq!(gui.view("menu").unwrap().buffer(), "kept\n");
    }

    #[test]
    fn test_set_view_rejects_empty_rectangle() {
        let mut gui: Gui<()> = Gui::new(80, 24);
        let err = gui.set_view("bad", 10, 0, 10, 5).unwrap_err();
        assert!(matches!(err, GuiError::InvalidDimensions { .. }));
        assert!(gui.set_view("bad", 0, 6, 10, 5).is_err());
        assert!(gui.view("bad").is_err());
    }

    #[test]
    fn test_unknown_view_lookups() {
        let mut gui: Gui<()> = Gui::new(80, 24);
        assert_eq!(
            gui.view("nope").unwrap_err(),
            GuiError::UnknownView("nope".to_string())
        );
        assert!(gui.set_current_view("nope").is_err());
        assert!(gui.delete_view("nope").is_err());
    }

    #[test]
    fn test_delete_current_view_clears_focus() {
        let mut gui: Gui<()> = Gui::new(80, 24);
        gui.set_view("a", 0, 0, 10, 5).unwrap();
        gui.set_view("b", 0, 0, 10, 5).unwrap();
        gui.set_current_view("a").unwrap();

        gui.delete_view("b").unwrap();
        assert_eq!(gui.current_view_name(), Some("a"));
        gui.delete_view("a").unwrap();
        assert_eq!(gui.current_view_name(), None);
        assert!(gui.current_view().is_none());
    }

    #[test]
    fn test_keybindings_fire_in_order_for_focused_view() {
        let mut gui: Gui<Vec<String>> = Gui::new(80, 24);
        gui.set_view("menu", 0, 0, 10, 5).unwrap();
        gui.set_view("side", 10, 0, 20, 5).unwrap();
        gui.set_current_view("menu").unwrap();

        gui.set_keybinding("menu", KeyChord::plain(KeyCode::Enter), |_, log, v| {
            log.push(format!("first:{}", v.unwrap_or("")));
            Ok(())
        });
        gui.set_keybinding("side", KeyChord::plain(KeyCode::Enter), |_, log, _| {
            log.push("side".to_string());
            Ok(())
        });
        gui.set_keybinding("", KeyChord::plain(KeyCode::Enter), |_, log, _| {
            log.push("global".to_string());
            Ok(())
        });

        let mut log = Vec::new();
        assert!(gui.handle_key(&press(KeyCode::Enter), &mut log).unwrap());
        assert_eq!(log, vec!["first:menu", "global"]);
        assert_eq!(gui.keybinding_count(), 3);
    }

    #[test]
    fn test_global_binding_without_focus() {
        let mut gui: Gui<u32> = Gui::new(80, 24);
        gui.set_keybinding("", KeyChord::ctrl('c'), |_, hits, view| {
            assert!(view.is_none());
            *hits += 1;
            Ok(())
        });

        let mut hits = 0;
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        gui.handle_key(&key, &mut hits).unwrap();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_handler_error_stops_later_handlers() {
        let mut gui: Gui<u32> = Gui::new(80, 24);
        gui.set_keybinding("", KeyChord::plain(KeyCode::Enter), |_, _, _| {
            Err(GuiError::Quit.into())
        });
        gui.set_keybinding("", KeyChord::plain(KeyCode::Enter), |_, hits, _| {
            *hits += 1;
            Ok(())
        });

        let mut hits = 0;
        let err = gui.handle_key(&press(KeyCode::Enter), &mut hits).unwrap_err();
        assert!(is_quit(&err));
        assert_eq!(hits, 0);
        // Bindings survive the failure
        assert_eq!(gui.keybinding_count(), 2);
    }

    #[test]
    fn test_unbound_key_goes_to_editable_view() {
        let mut gui: Gui<()> = Gui::new(80, 24);
        gui.set_view("input", 0, 0, 20, 3).unwrap().into_view().editable = true;
        gui.set_current_view("input").unwrap();

        assert!(gui.handle_key(&press(KeyCode::Char('x')), &mut ()).unwrap());
        assert_eq!(gui.view("input").unwrap().buffer(), "x\n");

        gui.view_mut("input").unwrap().editable = false;
        assert!(!gui.handle_key(&press(KeyCode::Char('y')), &mut ()).unwrap());
        assert_eq!(gui.view("input").unwrap().buffer(), "x\n");
    }

    #[test]
    fn test_layout_runs_manager() {
        let mut gui: Gui<u32> = Gui::new(40, 10);
        gui.set_manager(|g, runs| {
            *runs += 1;
            let (w, h) = g.size();
            g.set_view("full", 0, 0, w - 1, h - 1)?;
            Ok(())
        });

        let mut runs = 0;
        gui.layout(&mut runs).unwrap();
        gui.layout(&mut runs).unwrap();
        assert_eq!(runs, 2);
        assert_eq!(gui.view("full").unwrap().dimensions(), (0, 0, 39, 9));
    }

    #[test]
    fn test_updates_from_other_threads_apply_in_order() {
        let mut gui: Gui<()> = Gui::new(80, 24);
        gui.set_view("log", 0, 0, 40, 20).unwrap();

        let handle = gui.update_handle();
        let worker = std::thread::spawn(move || {
            for i in 0..5 {
                handle
                    .update(move |g| {
                        writeln!(g.view_mut("log")?, "line {}", i)?;
                        Ok(())
                    })
                    .unwrap();
            }
        });
        worker.join().unwrap();

        assert_eq!(gui.flush_updates().unwrap(), 5);
        assert_eq!(
            gui.view("log").unwrap().buffer(),
            "line 0\nline 1\nline 2\nline 3\nline 4\n"
        );
        // Applied exactly once
        assert_eq!(gui.flush_updates().unwrap(), 0);
    }

    #[test]
    fn test_failing_update_is_reported() {
        let mut gui: Gui<()> = Gui::new(80, 24);
        gui.update(|g| {
            g.view_mut("missing")?;
            Ok(())
        })
        .unwrap();
        let err = gui.flush_updates().unwrap_err();
        assert!(crate::is_unknown_view(&err));
    }

    #[test]
    fn test_draw_renders_views() {
        let mut gui: Gui<()> = Gui::new(20, 6);
        let view = gui.set_view("menu", 0, 0, 19, 5).unwrap().into_view();
        view.title = "Menu".to_string();
        writeln!(view, "hello").unwrap();

        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|frame| gui.draw(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (1..6).map(|x| buffer[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, "hello");
    }

    #[test]
    fn test_main_loop_ends_on_quit() {
        let mut gui: Gui<Vec<String>> = Gui::new(1, 1);
        gui.set_manager(|g, _| {
            g.set_view("main", 0, 0, 10, 4)?;
            if g.current_view().is_none() {
                g.set_current_view("main")?;
            }
            Ok(())
        });
        gui.set_keybinding("main", KeyChord::plain(KeyCode::Enter), |_, log, _| {
            log.push("enter".to_string());
            Ok(())
        });
        gui.set_keybinding("", KeyChord::ctrl('c'), |_, _, _| Err(GuiError::Quit.into()));

        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        let mut events = EventScript::new([
            Event::Tick,
            Event::Key(press(KeyCode::Enter)),
            Event::Resize(40, 10),
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Event::Key(press(KeyCode::Enter)),
        ]);
        let mut log = Vec::new();

        let err = gui.main_loop(&mut terminal, &mut events, &mut log).unwrap_err();
        assert!(is_quit(&err));
        assert_eq!(log, vec!["enter"]);
        assert_eq!(gui.size(), (40, 10));
        assert_eq!(events.remaining(), 1);
    }
}
