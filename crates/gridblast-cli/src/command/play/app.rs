use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind};
use gridblast_engine::{GRID_SIZE, GameSession, PlacementOutcome, SLOT_COUNT};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    tui::{App, Tui},
    view::widgets::{Banner, ControlsDisplay, SessionDisplay, style},
};

const BANNER_DURATION: Duration = Duration::from_millis(1500);

#[expect(clippy::cast_possible_wrap)]
const GRID_EXTENT: isize = GRID_SIZE as isize;

/// Interactive game screen.
///
/// The cursor is the top-left corner of the selected piece and always keeps
/// that piece inside the board.
#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    selected: usize,
    cursor: (isize, isize),
    banner: Option<(Banner, Instant)>,
    record_announced: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        let mut app = Self {
            session,
            selected: 0,
            cursor: (0, 0),
            banner: None,
            record_announced: false,
            is_exiting: false,
        };
        app.select_next_from(0);
        app
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Applies a key press; returns when the screen wants to be woken up.
    fn handle_key(&mut self, code: KeyCode, now: Instant) -> Option<Instant> {
        let is_playing = self.session.session_state().is_playing();
        match code {
            KeyCode::Left if is_playing => self.move_cursor(-1, 0),
            KeyCode::Right if is_playing => self.move_cursor(1, 0),
            KeyCode::Up if is_playing => self.move_cursor(0, -1),
            KeyCode::Down if is_playing => self.move_cursor(0, 1),
            KeyCode::Char(c @ '1'..='3') if is_playing => {
                if let Some(slot) = c.to_digit(10).and_then(|d| usize::try_from(d - 1).ok())
                    && self.session.slots().get(slot).is_some()
                {
                    self.select(slot);
                }
            }
            KeyCode::Tab if is_playing => self.select_next_from(self.selected + 1),
            KeyCode::Enter | KeyCode::Char(' ') if is_playing => return self.commit(now),
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('q') => self.is_exiting = true,
            _ => {}
        }
        None
    }

    fn commit(&mut self, now: Instant) -> Option<Instant> {
        let (x, y) = self.cursor;
        // Refused placements are ignored; the red ghost already shows why.
        let outcome = self.session.place_piece(self.selected, x, y)?;
        self.select_next_from(self.selected);
        let banner = self.banner_for(&outcome)?;
        let until = now + BANNER_DURATION;
        self.banner = Some((banner, until));
        Some(until)
    }

    fn banner_for(&mut self, outcome: &PlacementOutcome) -> Option<Banner> {
        if !self.record_announced && self.session.is_new_record() {
            self.record_announced = true;
            return Some(Banner {
                text: "NEW RECORD".to_owned(),
                style: style::RECORD_BANNER,
            });
        }
        if outcome.is_celebration() || (outcome.cleared_count() > 0 && outcome.combo >= 2) {
            return Some(Banner {
                text: format!("COMBO x{}", outcome.combo),
                style: style::COMBO_BANNER,
            });
        }
        None
    }

    fn restart(&mut self) {
        self.session.reset();
        self.banner = None;
        self.record_announced = false;
        self.cursor = (0, 0);
        self.select_next_from(0);
    }

    /// Selects the first non-empty slot at or after `start`, wrapping around.
    fn select_next_from(&mut self, start: usize) {
        let next = (0..SLOT_COUNT)
            .map(|offset| (start + offset) % SLOT_COUNT)
            .find(|&slot| self.session.slots().get(slot).is_some());
        if let Some(slot) = next {
            self.select(slot);
        }
    }

    fn select(&mut self, slot: usize) {
        self.selected = slot;
        self.move_cursor(0, 0);
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let (max_x, max_y) = self.cursor_limit();
        self.cursor = (
            (self.cursor.0 + dx).clamp(0, max_x),
            (self.cursor.1 + dy).clamp(0, max_y),
        );
    }

    /// Largest origin that keeps the selected piece on the board.
    fn cursor_limit(&self) -> (isize, isize) {
        let Some(piece) = self.session.slots().get(self.selected) else {
            return (GRID_EXTENT - 1, GRID_EXTENT - 1);
        };
        let shape = piece.shape();
        let width = isize::try_from(shape.width()).unwrap_or(GRID_EXTENT);
        let height = isize::try_from(shape.height()).unwrap_or(GRID_EXTENT);
        (GRID_EXTENT - width, GRID_EXTENT - height)
    }

    fn expire_banner(&mut self, now: Instant) {
        if self.banner.as_ref().is_some_and(|(_, until)| *until <= now) {
            self.banner = None;
        }
    }
}

impl App for PlayApp {
    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: &Event) {
        if let Some(key) = event.as_key_event()
            && key.kind == KeyEventKind::Press
            && let Some(wake_at) = self.handle_key(key.code, Instant::now())
        {
            tui.wake_at(wake_at);
        }
    }

    fn wake(&mut self, _tui: &mut Tui, now: Instant) {
        self.expire_banner(now);
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.session, self.selected, self.cursor)
            .banner(self.banner.as_ref().map(|(banner, _)| banner));

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .spacing(1)
        .areas(frame.area());
        frame.render_widget(&session_display, main_area);
        frame.render_widget(ControlsDisplay::new(self.session.session_state()), help_area);
    }
}
