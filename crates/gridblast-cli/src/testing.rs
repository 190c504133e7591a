use gridblast_engine::{
    GameSession, MemoryHighScore, Piece, PieceColor, PieceId, PieceSource, Shape,
};

/// Piece source that hands out the same shape forever.
#[derive(Debug)]
pub(crate) struct RepeatShape {
    shape: Shape,
    next_id: u64,
}

impl RepeatShape {
    pub(crate) fn new(shape: Shape) -> Self {
        Self { shape, next_id: 0 }
    }
}

impl PieceSource for RepeatShape {
    fn next_piece(&mut self) -> Piece {
        self.next_id += 1;
        Piece::new(PieceId::new(self.next_id), self.shape, PieceColor::Green)
    }
}

/// Session whose tray only ever holds `shape`.
pub(crate) fn repeat_session(shape: Shape, high_score: u64) -> GameSession {
    GameSession::with_providers(
        Box::new(RepeatShape::new(shape)),
        Box::new(MemoryHighScore::new(high_score)),
    )
}
