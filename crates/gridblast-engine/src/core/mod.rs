//! Board, shapes, and pieces: the pure data of the puzzle.

pub use self::{board::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod shape;

/// Width and height of the square board.
pub const GRID_SIZE: usize = 8;
