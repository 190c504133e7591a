//! Rules engine for an 8×8 block-placement puzzle.
//!
//! Pieces of fixed shapes are placed on the board; every row or column that
//! becomes fully occupied is cleared and scores points. The game ends when
//! none of the pieces left in the tray fits anywhere.
//!
//! - [`core`] holds the data: [`Board`], [`Shape`], [`Piece`] and the
//!   [`SHAPE_CATALOG`].
//! - [`engine`] drives a game: [`GameSession`] and its collaborators
//!   ([`PieceSource`], [`HighScoreStore`]).

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reasons a requested placement is refused.
///
/// A refused placement leaves the session untouched; interactive callers
/// usually ignore the error and let the player try again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("slot index {_0} is out of range")]
    SlotOutOfRange(#[error(not(source))] usize),
    #[display("slot {_0} holds no piece")]
    EmptySlot(#[error(not(source))] usize),
    #[display("piece does not fit at the requested position")]
    Blocked,
    #[display("game is over")]
    GameOver,
}

/// Reasons a [`Shape`] cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape has no rows or no columns")]
    Empty,
    #[display("shape rows differ in length")]
    Ragged,
    #[display("shape exceeds {}x{} cells", MAX_SHAPE_SIZE, MAX_SHAPE_SIZE)]
    TooLarge,
    #[display("shape cells must be 0 or 1")]
    InvalidCell,
    #[display("shape has no filled cell")]
    NoFilledCell,
}
