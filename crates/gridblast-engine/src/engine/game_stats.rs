/// Points per cleared line, before the combo multiplier.
const LINE_CLEAR_POINTS: u64 = 10;

/// Points awarded for a single placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementScore {
    /// One point per filled sub-cell of the placed piece.
    pub base_points: u64,
    /// Line clear bonus, including the combo multiplier.
    pub combo_bonus: u64,
}

impl PlacementScore {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.base_points + self.combo_bonus
    }
}

/// Game statistics tracking score, combo streak, and counters.
///
/// # Scoring
///
/// - Each placement scores one point per filled sub-cell of the piece.
/// - A placement that clears `n` lines (rows and columns together) adds
///   `n × 10 × (combo + 1)`, where `combo` is the streak before the placement.
/// - The combo streak grows by one on every clearing placement and drops to
///   zero on a placement that clears nothing. Refused placements never reach
///   the stats, so they leave the streak alone.
///
/// # Example
///
/// ```
/// use gridblast_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_placement(3, 1); // 3 cells, 1 line
/// stats.complete_placement(2, 2); // 2 cells, 2 lines on a streak of 1
///
/// assert_eq!(stats.score(), (3 + 10) + (2 + 2 * 10 * 2));
/// assert_eq!(stats.combo(), 2);
/// assert_eq!(stats.cleared_lines(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: u64,
    combo: u64,
    best_combo: u64,
    placed_pieces: usize,
    cleared_lines: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            combo: 0,
            best_combo: 0,
            placed_pieces: 0,
            cleared_lines: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Current streak of consecutive clearing placements.
    #[must_use]
    pub const fn combo(&self) -> u64 {
        self.combo
    }

    /// Longest streak reached so far.
    #[must_use]
    pub const fn best_combo(&self) -> u64 {
        self.best_combo
    }

    #[must_use]
    pub const fn placed_pieces(&self) -> usize {
        self.placed_pieces
    }

    /// Total rows and columns cleared.
    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Computes the points of a placement without recording it.
    #[must_use]
    pub const fn score_placement(&self, cell_count: usize, cleared_lines: usize) -> PlacementScore {
        let combo_bonus = if cleared_lines > 0 {
            cleared_lines as u64 * LINE_CLEAR_POINTS * (self.combo + 1)
        } else {
            0
        };
        PlacementScore {
            base_points: cell_count as u64,
            combo_bonus,
        }
    }

    /// Records a committed placement and returns the points it earned.
    ///
    /// # Arguments
    ///
    /// * `cell_count` - Number of filled sub-cells of the placed piece
    /// * `cleared_lines` - Number of rows plus columns cleared by the placement
    pub const fn complete_placement(
        &mut self,
        cell_count: usize,
        cleared_lines: usize,
    ) -> PlacementScore {
        let points = self.score_placement(cell_count, cleared_lines);
        self.score += points.total();
        self.placed_pieces += 1;
        self.cleared_lines += cleared_lines;
        if cleared_lines > 0 {
            self.combo += 1;
            if self.combo > self.best_combo {
                self.best_combo = self.combo;
            }
        } else {
            self.combo = 0;
        }
        points
    }
}
