use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{
    piece::{Piece, PieceColor, PieceId},
    shape::SHAPE_CATALOG,
};

/// Supplies new pieces to a game session.
///
/// The session draws from its source whenever the tray has to be refilled,
/// so swapping the source is how tests and replays control which pieces
/// appear.
pub trait PieceSource: fmt::Debug {
    /// Produces the next piece. Every call returns a piece with a fresh id.
    fn next_piece(&mut self) -> Piece;
}

/// Random piece generator.
///
/// Each piece gets a shape drawn uniformly from [`SHAPE_CATALOG`] and a
/// colour drawn uniformly from the palette. Ids are assigned sequentially.
///
/// # Example
///
/// ```
/// use gridblast_engine::{PieceGenerator, PieceSeed};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
/// assert_eq!(a.generate(), b.generate());
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
    next_id: u64,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(*seed.as_bytes()),
            next_id: 0,
        }
    }

    /// Draws a new random piece.
    pub fn generate(&mut self) -> Piece {
        let shape = SHAPE_CATALOG[self.rng.random_range(0..SHAPE_CATALOG.len())];
        let color: PieceColor = self.rng.random();
        let id = PieceId::new(self.next_id);
        self.next_id += 1;
        Piece::new(id, shape, color)
    }
}

impl PieceSource for PieceGenerator {
    fn next_piece(&mut self) -> Piece {
        self.generate()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed, written as a 32-character hex string both in its
/// [`Display`](fmt::Display)/[`FromStr`] form and when serialized. Using the
/// same seed produces the same sequence of pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    /// Raw seed bytes, usable with any [`SeedableRng`](rand::SeedableRng) taking 16 bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

/// Error returned when parsing a [`PieceSeed`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex: {reason}")]
pub struct ParsePieceSeedError {
    #[error(not(source))]
    reason: String,
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(ParsePieceSeedError {
                reason: format!("expected 32 characters, got {}", hex_str.len()),
            });
        }
        if let Some(c) = hex_str.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError {
                reason: format!("{hex_str} (unexpected character {c:?})"),
            });
        }
        let num = u128::from_str_radix(hex_str, 16).map_err(|e| ParsePieceSeedError {
            reason: format!("{hex_str} ({e})"),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}
