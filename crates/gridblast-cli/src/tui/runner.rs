use std::{io, time::Instant};

use super::{App, event::TuiEvent, event_loop::EventLoop};

/// Terminal runtime.
///
/// Owns the event loop and drives an [`App`] until it asks to exit.
#[derive(Debug, Default)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks for [`App::wake`] to be called at `at`.
    pub fn wake_at(&mut self, at: Instant) {
        self.events.wake_at(at);
    }

    /// Runs `app` on the terminal, restoring the terminal afterwards.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Wake => app.wake(&mut self, Instant::now()),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, &event),
                }
            }
            Ok(())
        })
    }
}
