//! Input events for the main loop.
//!
//! This module provides:
//! - `Event` - What the main loop reacts to (keyboard, resize, tick)
//! - `EventSource` - Where events come from
//! - `EventHandler` - Polling crossterm for terminal events
//! - `EventScript` - A fixed sequence of events, for tests and replays

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Main loop event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard event
    Key(KeyEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Nothing happened within the tick rate
    Tick,
}

/// Blocking source of main loop events.
pub trait EventSource {
    /// Wait for the next event.
    fn next(&mut self) -> Result<Event>;
}

/// Event handler for polling terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }
}

impl EventSource for EventHandler {
    fn next(&mut self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Release and Repeat arrive with the kitty keyboard protocol
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

/// Replays a fixed list of events, then fails.
///
/// Running out of events is an error so that a scripted main loop which is
/// never told to quit ends instead of spinning.
#[derive(Debug, Default)]
pub struct EventScript {
    events: VecDeque<Event>,
}

impl EventScript {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Append an event to the end of the script.
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for EventScript {
    fn next(&mut self) -> Result<Event> {
        match self.events.pop_front() {
            Some(event) => Ok(event),
            None => bail!("Event script exhausted"),
        }
    }
}
