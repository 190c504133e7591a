use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::shape::Shape;

/// A placeable shape instance with a colour.
///
/// Pieces are immutable once created. The [`PieceId`] only distinguishes
/// instances (e.g. for UI keying) and has no gameplay meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    shape: Shape,
    color: PieceColor,
}

impl Piece {
    #[must_use]
    pub const fn new(id: PieceId, shape: Shape, color: PieceColor) -> Self {
        Self { id, shape, color }
    }

    #[must_use]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn color(&self) -> PieceColor {
        self.color
    }
}

/// Opaque identity of a [`Piece`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("#{_0}")]
pub struct PieceId(u64);

impl PieceId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Colour palette of pieces and occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceColor {
    Blue = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Purple = 4,
    Orange = 5,
    Cyan = 6,
    Pink = 7,
}

impl Distribution<PieceColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceColor {
        PieceColor::ALL[rng.random_range(0..PieceColor::LEN)]
    }
}

impl PieceColor {
    /// Number of colours in the palette (8).
    pub const LEN: usize = 8;

    pub const ALL: [Self; Self::LEN] = [
        PieceColor::Blue,
        PieceColor::Red,
        PieceColor::Green,
        PieceColor::Yellow,
        PieceColor::Purple,
        PieceColor::Orange,
        PieceColor::Cyan,
        PieceColor::Pink,
    ];

    /// Returns the single character representation of this colour.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridblast_engine::PieceColor;
    ///
    /// assert_eq!(PieceColor::Blue.as_char(), 'B');
    /// assert_eq!(PieceColor::Pink.as_char(), 'K');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceColor::Blue => 'B',
            PieceColor::Red => 'R',
            PieceColor::Green => 'G',
            PieceColor::Yellow => 'Y',
            PieceColor::Purple => 'P',
            PieceColor::Orange => 'O',
            PieceColor::Cyan => 'C',
            PieceColor::Pink => 'K',
        }
    }

    /// Parses a colour from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridblast_engine::PieceColor;
    ///
    /// assert_eq!(PieceColor::from_char('G'), Some(PieceColor::Green));
    /// assert_eq!(PieceColor::from_char('x'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(PieceColor::Blue),
            'R' => Some(PieceColor::Red),
            'G' => Some(PieceColor::Green),
            'Y' => Some(PieceColor::Yellow),
            'P' => Some(PieceColor::Purple),
            'O' => Some(PieceColor::Orange),
            'C' => Some(PieceColor::Cyan),
            'K' => Some(PieceColor::Pink),
            _ => None,
        }
    }
}
