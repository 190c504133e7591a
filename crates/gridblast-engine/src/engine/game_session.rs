use tracing::{debug, info};

use crate::{
    PlacementError,
    core::{
        board::{Board, FullLines},
        piece::Piece,
    },
};

use super::{
    game_stats::{GameStats, PlacementScore},
    high_score::{HighScoreStore, MemoryHighScore},
    piece_generator::{PieceGenerator, PieceSeed, PieceSource},
    piece_slots::{PieceSlots, SLOT_COUNT},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    /// Terminal state; only [`GameSession::reset`] leaves it.
    GameOver,
}

/// What a committed placement did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOutcome {
    /// The piece that was placed.
    pub piece: Piece,
    /// Origin the piece was placed at.
    pub position: (isize, isize),
    pub score: PlacementScore,
    /// Rows and columns cleared by the placement.
    pub cleared: FullLines,
    /// Combo streak after the placement.
    pub combo: u64,
    /// The placement raised the high score.
    pub new_high_score: bool,
    /// The tray was emptied and refilled with three new pieces.
    pub refilled: bool,
    /// No remaining piece fits anywhere; the session is over.
    pub game_over: bool,
}

impl PlacementOutcome {
    #[must_use]
    pub const fn points(&self) -> u64 {
        self.score.total()
    }

    #[must_use]
    pub fn cleared_count(&self) -> usize {
        self.cleared.count()
    }

    /// Two or more lines cleared at once.
    #[must_use]
    pub fn is_celebration(&self) -> bool {
        self.cleared_count() >= 2
    }
}

/// A single game: board, piece tray, score, and game-over detection.
///
/// The session is the only writer of its board. Every placement is validated
/// first and then applied completely: either nothing changes (the request is
/// refused with a [`PlacementError`]) or board, tray, stats, and state all
/// move to the next state together.
///
/// # Example
///
/// ```
/// use gridblast_engine::{GameSession, PieceSeed};
///
/// let seed: PieceSeed = "00000000000000000000000000000001".parse().unwrap();
/// let mut session = GameSession::with_seed(seed);
///
/// // Every piece fits somewhere on the empty board.
/// let shape = *session.slots().get(0).unwrap().shape();
/// let (x, y) = session.board().legal_origins(&shape).next().unwrap();
///
/// let outcome = session.try_place_piece(0, x, y).unwrap();
/// assert_eq!(outcome.points(), shape.cell_count() as u64);
/// assert!(session.slots().get(0).is_none());
///
/// // Refused placements leave the session untouched.
/// assert!(session.try_place_piece(0, x, y).is_err());
/// ```
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    slots: PieceSlots,
    stats: GameStats,
    high_score: u64,
    initial_high_score: u64,
    session_state: SessionState,
    pieces: Box<dyn PieceSource>,
    store: Box<dyn HighScoreStore>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session with random pieces and an in-memory high score.
    #[must_use]
    pub fn new() -> Self {
        Self::with_providers(
            Box::new(PieceGenerator::new()),
            Box::new(MemoryHighScore::default()),
        )
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_providers(
            Box::new(PieceGenerator::with_seed(seed)),
            Box::new(MemoryHighScore::default()),
        )
    }

    /// Creates a session drawing pieces from `pieces` and keeping its best
    /// score in `store`.
    #[must_use]
    pub fn with_providers(
        mut pieces: Box<dyn PieceSource>,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        let high_score = store.load();
        let slots = PieceSlots::generate(pieces.as_mut());
        Self {
            board: Board::EMPTY,
            slots,
            stats: GameStats::new(),
            high_score,
            initial_high_score: high_score,
            session_state: SessionState::Playing,
            pieces,
            store,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn slots(&self) -> &PieceSlots {
        &self.slots
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    #[must_use]
    pub fn combo(&self) -> u64 {
        self.stats.combo()
    }

    #[must_use]
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    /// The current score beats a non-zero record that existed when this
    /// session started.
    #[must_use]
    pub fn is_new_record(&self) -> bool {
        self.initial_high_score > 0 && self.stats.score() > self.initial_high_score
    }

    /// Validates a placement without applying it.
    ///
    /// Returns the piece that would be placed.
    pub fn check_placement(
        &self,
        slot: usize,
        x: isize,
        y: isize,
    ) -> Result<&Piece, PlacementError> {
        if self.session_state.is_game_over() {
            return Err(PlacementError::GameOver);
        }
        if slot >= SLOT_COUNT {
            return Err(PlacementError::SlotOutOfRange(slot));
        }
        let piece = self
            .slots
            .get(slot)
            .ok_or(PlacementError::EmptySlot(slot))?;
        if !self.board.can_place(piece.shape(), x, y) {
            return Err(PlacementError::Blocked);
        }
        Ok(piece)
    }

    /// Preview query: would placing `slot` at `(x, y)` be accepted?
    #[must_use]
    pub fn can_place(&self, slot: usize, x: isize, y: isize) -> bool {
        self.check_placement(slot, x, y).is_ok()
    }

    /// Whether the piece in `slot` fits anywhere on the current board.
    ///
    /// Empty and out-of-range slots are not playable.
    #[must_use]
    pub fn is_slot_playable(&self, slot: usize) -> bool {
        self.slots
            .get(slot)
            .is_some_and(|piece| self.board.can_place_anywhere(piece.shape()))
    }

    /// Places the piece in `slot` with its top-left corner at `(x, y)`.
    ///
    /// On success, full rows and columns are cleared and scored, the slot is
    /// emptied (and the whole tray refilled if it was the last piece), the
    /// high score is updated and persisted if beaten, and game over is
    /// evaluated against the resulting tray.
    ///
    /// On error nothing changes, not even the combo streak.
    pub fn try_place_piece(
        &mut self,
        slot: usize,
        x: isize,
        y: isize,
    ) -> Result<PlacementOutcome, PlacementError> {
        let piece = *self.check_placement(slot, x, y)?;

        let mut board = self.board.placed(piece.shape(), piece.color(), x, y);
        let cleared = board.find_full_lines();
        board.clear_lines(&cleared);

        let score = self
            .stats
            .complete_placement(piece.shape().cell_count(), cleared.count());
        let new_high_score = self.stats.score() > self.high_score;
        if new_high_score {
            self.high_score = self.stats.score();
        }

        self.slots.take(slot);
        let refilled = self.slots.refill_if_exhausted(self.pieces.as_mut());
        let game_over =
            !self.slots.is_exhausted() && !board.has_any_legal_move(self.slots.iter());
        self.board = board;

        debug!(
            slot,
            x,
            y,
            points = score.total(),
            rows = ?cleared.rows(),
            cols = ?cleared.cols(),
            combo = self.stats.combo(),
            refilled,
            "piece placed"
        );

        if game_over {
            self.session_state = SessionState::GameOver;
            info!(
                score = self.stats.score(),
                placed_pieces = self.stats.placed_pieces(),
                cleared_lines = self.stats.cleared_lines(),
                "game over"
            );
        }
        if new_high_score {
            info!(high_score = self.high_score, "new high score");
            self.store.save(self.high_score);
        }

        Ok(PlacementOutcome {
            piece,
            position: (x, y),
            score,
            cleared,
            combo: self.stats.combo(),
            new_high_score,
            refilled,
            game_over,
        })
    }

    /// Like [`Self::try_place_piece`], discarding the reason of a refusal.
    pub fn place_piece(&mut self, slot: usize, x: isize, y: isize) -> Option<PlacementOutcome> {
        self.try_place_piece(slot, x, y).ok()
    }

    /// Starts a new game with an empty board and a fresh tray.
    ///
    /// The high score carries over; a higher value in the store (e.g. written
    /// by another session) is picked up, a lower one is ignored.
    pub fn reset(&mut self) {
        self.high_score = self.high_score.max(self.store.load());
        self.initial_high_score = self.high_score;
        self.board = Board::EMPTY;
        self.slots = PieceSlots::generate(self.pieces.as_mut());
        self.stats = GameStats::new();
        self.session_state = SessionState::Playing;
        info!(high_score = self.high_score, "session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Cell, PieceColor, PieceId, SHAPE_CATALOG, Shape,
        engine::piece_generator::testing::ScriptedPieces,
    };

    const DOT: Shape = SHAPE_CATALOG[0];
    const BAR2: Shape = SHAPE_CATALOG[1];
    const BAR3: Shape = SHAPE_CATALOG[3];
    const SQUARE3: Shape = SHAPE_CATALOG[10];

    fn scripted_session(shapes: &[Shape], store: &MemoryHighScore) -> GameSession {
        GameSession::with_providers(
            Box::new(ScriptedPieces::new(shapes.iter().copied())),
            Box::new(store.clone()),
        )
    }

    fn piece(id: u64, shape: Shape) -> Piece {
        Piece::new(PieceId::new(id), shape, PieceColor::Yellow)
    }

    /// Session with a prepared board and tray; refills come from `refills`.
    fn session_with(
        board: Board,
        slots: [Option<Piece>; SLOT_COUNT],
        refills: &[Shape],
    ) -> GameSession {
        let mut session = scripted_session(&[DOT, DOT, DOT], &MemoryHighScore::default());
        session.board = board;
        session.slots = PieceSlots::from_slots(slots);
        session.pieces = Box::new(ScriptedPieces::new(refills.iter().copied()));
        session
    }

    #[test]
    fn test_new_session() {
        let store = MemoryHighScore::new(42);
        let session = scripted_session(&[DOT, BAR2, BAR3], &store);
        assert!(session.board().is_empty());
        assert_eq!(session.slots().remaining(), SLOT_COUNT);
        assert_eq!(session.score(), 0);
        assert_eq!(session.combo(), 0);
        assert_eq!(session.high_score(), 42);
        assert!(session.session_state().is_playing());
    }

    #[test]
    fn test_row_zero_scenario() {
        let store = MemoryHighScore::default();
        let mut session = scripted_session(&[BAR3, BAR3, BAR2, DOT, DOT, DOT], &store);

        let first = session.try_place_piece(0, 0, 0).unwrap();
        assert_eq!(first.points(), 3);
        let second = session.try_place_piece(1, 3, 0).unwrap();
        assert_eq!(second.points(), 3);
        assert!(!second.refilled);

        let third = session.try_place_piece(2, 6, 0).unwrap();
        assert_eq!(third.cleared.rows(), [0]);
        assert!(third.cleared.cols().is_empty());
        assert_eq!(third.score.base_points, 2);
        assert_eq!(third.score.combo_bonus, 10);
        assert_eq!(third.combo, 1);
        assert!(third.refilled);
        assert!(!third.is_celebration());

        assert_eq!(session.score(), 18);
        assert_eq!(session.combo(), 1);
        assert!(session.board().is_empty());
        assert_eq!(session.slots().remaining(), SLOT_COUNT);
    }

    #[test]
    fn test_double_clear_then_game_over_on_refill() {
        let board = Board::from_ascii(
            r"
            ########
            ########
            ########
            ########
            ########
            ########
            ########
            #######.
            ",
        );
        let mut session = session_with(
            board,
            [None, None, Some(piece(100, DOT))],
            &[SQUARE3, SQUARE3, SQUARE3],
        );

        let outcome = session.try_place_piece(2, 7, 7).unwrap();
        assert_eq!(outcome.cleared.rows(), [7]);
        assert_eq!(outcome.cleared.cols(), [7]);
        assert_eq!(outcome.cleared_count(), 2);
        assert!(outcome.is_celebration());
        assert_eq!(outcome.points(), 1 + 2 * 10);
        assert!(outcome.refilled);
        assert!(outcome.game_over);

        assert_eq!(session.board().cell(7, 7), Cell::Empty);
        assert_eq!(session.board().occupied_count(), 7 * 7);
        assert!(session.session_state().is_game_over());
        assert_eq!(session.slots().remaining(), SLOT_COUNT);

        assert_eq!(
            session.try_place_piece(0, 0, 7),
            Err(PlacementError::GameOver)
        );
    }

    #[test]
    fn test_double_clear_with_placeable_refill_keeps_playing() {
        let board = Board::from_ascii(
            r"
            ########
            ########
            ########
            ########
            ########
            ########
            ########
            #######.
            ",
        );
        let mut session = session_with(
            board,
            [None, None, Some(piece(100, DOT))],
            &[BAR3, DOT, SQUARE3],
        );
        let outcome = session.try_place_piece(2, 7, 7).unwrap();
        assert!(!outcome.game_over);
        assert!(session.session_state().is_playing());
        assert!(session.is_slot_playable(0));
        assert!(session.is_slot_playable(1));
        assert!(!session.is_slot_playable(2));
    }

    #[test]
    fn test_game_over_with_remaining_unplaceable_pieces() {
        let board = Board::from_ascii(
            r"
            ########
            ########
            ########
            ########
            ########
            ########
            #.#.#.#.
            .#.#.#..
            ",
        );
        let mut session = session_with(
            board,
            [Some(piece(1, DOT)), Some(piece(2, SQUARE3)), None],
            &[],
        );
        // Fills (7, 7); no line completes and only the 3x3 square is left.
        let outcome = session.try_place_piece(0, 7, 7).unwrap();
        assert!(outcome.cleared.is_empty());
        assert!(!outcome.refilled);
        assert!(outcome.game_over);
        assert!(session.session_state().is_game_over());
    }

    #[test]
    fn test_refused_placements_leave_session_unchanged() {
        let board = Board::from_ascii(
            r"
            #.......
            ",
        );
        let mut session =
            session_with(board, [Some(piece(1, BAR3)), None, Some(piece(2, DOT))], &[]);
        let board_before = *session.board();
        let slots_before = session.slots().clone();
        let stats_before = session.stats().clone();

        assert_eq!(
            session.try_place_piece(3, 1, 1),
            Err(PlacementError::SlotOutOfRange(3))
        );
        assert_eq!(
            session.try_place_piece(1, 1, 1),
            Err(PlacementError::EmptySlot(1))
        );
        assert_eq!(session.try_place_piece(0, 0, 0), Err(PlacementError::Blocked));
        assert_eq!(session.try_place_piece(0, 6, 3), Err(PlacementError::Blocked));
        assert_eq!(session.try_place_piece(2, -1, 0), Err(PlacementError::Blocked));
        assert!(session.place_piece(2, 0, 8).is_none());

        assert_eq!(*session.board(), board_before);
        assert_eq!(*session.slots(), slots_before);
        assert_eq!(*session.stats(), stats_before);
        assert!(session.session_state().is_playing());
    }

    #[test]
    fn test_combo_streak_reset_and_restart() {
        let board = Board::from_ascii(
            r"
            #######.
            #######.
            #######.
            ",
        );
        let dots = [Some(piece(1, DOT)), Some(piece(2, DOT)), Some(piece(3, DOT))];
        let mut session = session_with(board, dots, &[DOT, DOT, DOT]);

        assert_eq!(session.try_place_piece(0, 7, 0).unwrap().score.combo_bonus, 10);
        assert_eq!(session.try_place_piece(1, 7, 1).unwrap().score.combo_bonus, 20);
        assert_eq!(session.combo(), 2);

        // A refused attempt does not break the streak.
        assert!(session.try_place_piece(2, 0, 2).is_err());
        assert_eq!(session.combo(), 2);

        let quiet = session.try_place_piece(2, 0, 5).unwrap();
        assert_eq!(quiet.combo, 0);
        assert_eq!(quiet.points(), 1);
        assert!(quiet.refilled);

        let restart = session.try_place_piece(0, 7, 2).unwrap();
        assert_eq!(restart.cleared_count(), 1);
        assert_eq!(restart.score.combo_bonus, 10);
        assert_eq!(restart.combo, 1);
        assert_eq!(session.stats().best_combo(), 2);
    }

    #[test]
    fn test_high_score_persisted_only_when_raised() {
        let store = MemoryHighScore::new(4);
        let mut session = scripted_session(&[BAR2, BAR3, DOT, DOT, DOT, DOT], &store);

        let outcome = session.try_place_piece(0, 0, 0).unwrap();
        assert!(!outcome.new_high_score);
        assert_eq!(session.high_score(), 4);
        assert_eq!(store.save_count(), 0);
        assert!(!session.is_new_record());

        let outcome = session.try_place_piece(1, 0, 2).unwrap();
        assert!(outcome.new_high_score);
        assert_eq!(session.high_score(), 5);
        assert_eq!(store.load(), 5);
        assert_eq!(store.save_count(), 1);
        assert!(session.is_new_record());

        session.try_place_piece(2, 0, 4).unwrap();
        assert_eq!(store.load(), 6);
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn test_new_record_requires_previous_record() {
        let store = MemoryHighScore::default();
        let mut session = scripted_session(&[BAR3, DOT, DOT], &store);
        session.try_place_piece(0, 0, 0).unwrap();
        assert_eq!(session.high_score(), 3);
        assert!(!session.is_new_record());
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let store = MemoryHighScore::new(2);
        let mut shapes = vec![BAR3];
        shapes.extend([DOT; 11]);
        let mut session = scripted_session(&shapes, &store);
        session.try_place_piece(0, 0, 0).unwrap();
        assert_eq!(session.high_score(), 3);

        session.reset();
        assert!(session.board().is_empty());
        assert_eq!(session.score(), 0);
        assert_eq!(session.combo(), 0);
        assert_eq!(session.slots().remaining(), SLOT_COUNT);
        assert!(session.session_state().is_playing());
        assert_eq!(session.high_score(), 3);

        // A lower stored value never lowers the high score.
        let mut handle = store.clone();
        handle.save(1);
        session.reset();
        assert_eq!(session.high_score(), 3);

        // A higher stored value is picked up.
        handle.save(50);
        session.reset();
        assert_eq!(session.high_score(), 50);
    }

    #[test]
    fn test_reset_leaves_game_over() {
        let board = Board::from_ascii(
            r"
            ########
            ########
            ########
            ########
            ########
            ########
            ########
            #######.
            ",
        );
        let mut session = session_with(
            board,
            [None, Some(piece(1, DOT)), None],
            &[SQUARE3, SQUARE3, SQUARE3, DOT, DOT, DOT],
        );
        session.try_place_piece(1, 7, 7).unwrap();
        assert!(session.session_state().is_game_over());

        session.reset();
        assert!(session.session_state().is_playing());
        assert!(session.board().is_empty());
        assert!(session.can_place(0, 0, 0));
    }

    #[test]
    fn test_seeded_sessions_play_identically() {
        let seed: PieceSeed = "0f1e2d3c4b5a69788796a5b4c3d2e1f0".parse().unwrap();
        let mut a = GameSession::with_seed(seed);
        let mut b = GameSession::with_seed(seed);
        for _ in 0..30 {
            assert_eq!(a.slots(), b.slots());
            let Some((slot, (x, y))) = first_legal_move(&a) else {
                break;
            };
            assert_eq!(a.try_place_piece(slot, x, y), b.try_place_piece(slot, x, y));
        }
        assert_eq!(a.board(), b.board());
        assert_eq!(a.score(), b.score());
    }

    fn first_legal_move(session: &GameSession) -> Option<(usize, (isize, isize))> {
        (0..SLOT_COUNT).find_map(|slot| {
            let piece = session.slots().get(slot)?;
            let origin = session.board().legal_origins(piece.shape()).next()?;
            Some((slot, origin))
        })
    }

    #[test]
    fn test_long_game_invariants() {
        let seed: PieceSeed = "00112233445566778899aabbccddeeff".parse().unwrap();
        let mut session = GameSession::with_seed(seed);
        let mut previous_score = 0;
        let mut previous_high = 0;
        for _ in 0..500 {
            let Some((slot, (x, y))) = first_legal_move(&session) else {
                assert!(session.session_state().is_game_over());
                break;
            };
            let outcome = session.try_place_piece(slot, x, y).unwrap();
            assert!(session.score() >= previous_score);
            assert!(session.high_score() >= previous_high);
            assert!(session.high_score() >= session.score());
            assert!(!session.slots().is_exhausted());
            assert_eq!(outcome.game_over, session.session_state().is_game_over());
            previous_score = session.score();
            previous_high = session.high_score();
        }
    }
}
