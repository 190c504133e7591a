//! Game rules and session state.
//!
//! - [`GameSession`] - One game: validates and applies placements, detects game over
//! - [`GameStats`] - Score, combo streak, and counters
//! - [`PieceSlots`] - The three-slot tray the player picks pieces from
//! - [`PieceGenerator`] - Seeded random piece source
//! - [`HighScoreStore`] - Where the best score lives between sessions
//!
//! # Turn Flow
//!
//! 1. The player picks a slot and a board position
//! 2. [`GameSession::try_place_piece`] refuses the request or commits it
//! 3. Full rows and columns are cleared together and scored
//! 4. When the tray is empty it is refilled with three new pieces
//! 5. If no remaining piece fits anywhere the session is over
//!
//! # Example
//!
//! ```
//! use gridblast_engine::{GameSession, HighScoreStore, MemoryHighScore, PieceGenerator};
//!
//! let store = MemoryHighScore::new(0);
//! let mut session =
//!     GameSession::with_providers(Box::new(PieceGenerator::new()), Box::new(store.clone()));
//!
//! // Greedy play: first slot and first position that fit.
//! for _ in 0..20 {
//!     let Some((slot, (x, y))) = (0..3).find_map(|slot| {
//!         let piece = session.slots().get(slot)?;
//!         Some((slot, session.board().legal_origins(piece.shape()).next()?))
//!     }) else {
//!         break;
//!     };
//!     session.try_place_piece(slot, x, y).unwrap();
//! }
//!
//! assert!(session.score() > 0);
//! assert_eq!(store.load(), session.high_score());
//! ```

pub use self::{game_session::*, game_stats::*, high_score::*, piece_generator::*, piece_slots::*};

mod game_session;
mod game_stats;
mod high_score;
mod piece_generator;
mod piece_slots;
