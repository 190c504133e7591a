use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// Decides what the runtime does next.
///
/// Wake-ups are served first, then a pending redraw, then terminal input.
#[derive(Debug)]
pub(super) struct EventLoop {
    wake_at: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            wake_at: None,
            dirty: true, // first frame
        }
    }

    /// Schedules a wake-up; an earlier pending one wins.
    pub(super) fn wake_at(&mut self, at: Instant) {
        self.wake_at = Some(self.wake_at.map_or(at, |current| current.min(at)));
    }

    /// Returns the event that is due at `now` without waiting, if any.
    fn due(&mut self, now: Instant) -> Option<TuiEvent> {
        if self.wake_at.is_some_and(|at| at <= now) {
            self.wake_at = None;
            self.dirty = true;
            return Some(TuiEvent::Wake);
        }
        if self.dirty {
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// How long input may be waited for; `None` means until the next key.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        self.wake_at.map(|at| at.saturating_duration_since(now))
    }

    /// Blocks until the next event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due(now) {
                return Ok(event);
            }
            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
