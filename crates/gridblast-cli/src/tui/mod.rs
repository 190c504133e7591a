//! Minimal runtime for turn-based terminal screens.
//!
//! Nothing moves on its own in a turn-based game, so the loop sleeps until
//! the player presses a key or the app asks to be woken up (to hide a banner,
//! for example) and redraws only after something happened.

pub use self::{app::App, runner::Tui};

mod app;
mod event;
mod event_loop;
mod runner;
