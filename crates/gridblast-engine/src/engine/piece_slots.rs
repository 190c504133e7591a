use crate::core::piece::Piece;

use super::piece_generator::PieceSource;

/// Number of slots in the piece tray.
pub const SLOT_COUNT: usize = 3;

/// The tray of pieces the player chooses from.
///
/// Slots empty one at a time as pieces are placed. Once the last one is
/// used, all slots are refilled together, so after any completed transition
/// at least one slot holds a piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSlots {
    slots: [Option<Piece>; SLOT_COUNT],
}

impl PieceSlots {
    /// Fills every slot with a new piece from `source`.
    pub fn generate(source: &mut dyn PieceSource) -> Self {
        Self {
            slots: [
                Some(source.next_piece()),
                Some(source.next_piece()),
                Some(source.next_piece()),
            ],
        }
    }

    #[cfg(test)]
    pub(crate) fn from_slots(slots: [Option<Piece>; SLOT_COUNT]) -> Self {
        Self { slots }
    }

    /// Returns the piece in `index`, or `None` if the slot is empty or out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Piece> {
        self.slots.get(index)?.as_ref()
    }

    /// Iterates over all slots in order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = Option<&Piece>> + '_ {
        self.slots.iter().map(Option::as_ref)
    }

    /// Number of slots that still hold a piece.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Removes and returns the piece in `index`.
    pub(crate) fn take(&mut self, index: usize) -> Option<Piece> {
        self.slots.get_mut(index)?.take()
    }

    /// Refills all slots at once if every slot is empty.
    ///
    /// Returns `true` if a refill happened.
    pub(crate) fn refill_if_exhausted(&mut self, source: &mut dyn PieceSource) -> bool {
        if !self.is_exhausted() {
            return false;
        }
        *self = Self::generate(source);
        true
    }
}
