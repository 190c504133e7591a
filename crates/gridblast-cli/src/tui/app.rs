use std::time::Instant;

use crossterm::event::Event;
use ratatui::Frame;

use super::Tui;

/// Trait for screens driven by [`Tui::run`].
pub trait App {
    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, tui: &mut Tui, event: &Event);

    /// Called when a wake-up scheduled with [`Tui::wake_at`] is due.
    fn wake(&mut self, tui: &mut Tui, now: Instant);

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);
}
