//! Terminal event polling.

use crate::{TuiError, TuiErrorKind, TuiResult};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Event types for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Nothing happened within the tick rate
    Tick,
    /// Key press
    Key(KeyEvent),
    /// Terminal resized
    Resize,
}

/// Polls the terminal for events.
#[derive(Debug, Clone, Copy)]
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a handler that yields [`Event::Tick`] after `tick_rate_ms` of silence.
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Wait up to the tick rate for the next event.
    ///
    /// Key releases and repeats are dropped so each press acts once.
    pub fn next(&self) -> TuiResult<Option<Event>> {
        if !event::poll(self.tick_rate)
            .map_err(|e| TuiError::new(TuiErrorKind::EventPoll(e.to_string())))?
        {
            return Ok(Some(Event::Tick));
        }

        match event::read().map_err(|e| TuiError::new(TuiErrorKind::EventRead(e.to_string())))? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(Event::Key(key))),
            CrosstermEvent::Resize(_, _) => Ok(Some(Event::Resize)),
            _ => Ok(None),
        }
    }
}
