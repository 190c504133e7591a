use arrayvec::ArrayVec;

use super::{
    GRID_SIZE,
    piece::{Piece, PieceColor},
    shape::Shape,
};

/// Board extent as a signed coordinate, for origins that may lie off the board.
#[expect(clippy::cast_possible_wrap)]
const GRID_EXTENT: isize = GRID_SIZE as isize;

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(PieceColor),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[must_use]
    pub const fn is_occupied(self) -> bool {
        !self.is_empty()
    }
}

/// Rows and columns that are completely occupied.
///
/// Rows and columns are detected independently, so one cell may belong to
/// both a full row and a full column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullLines {
    rows: ArrayVec<usize, GRID_SIZE>,
    cols: ArrayVec<usize, GRID_SIZE>,
}

impl FullLines {
    /// Indices of full rows, ascending.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Indices of full columns, ascending.
    #[must_use]
    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    /// Total number of full lines (rows plus columns).
    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// The 8×8 playing field.
///
/// Cells are addressed as `(x, y)` with `x` the column and `y` the row, both
/// starting at the top-left corner. `Board` is a small `Copy` value: the game
/// session replaces it wholesale on each placement, and previews can work on
/// their own copy without touching the committed board.
///
/// # Example
///
/// ```
/// use gridblast_engine::{Board, PieceColor, SHAPE_CATALOG};
///
/// let line = SHAPE_CATALOG[7]; // 1x5 horizontal
/// let mut board = Board::EMPTY;
/// assert!(board.can_place(&line, 3, 0));
/// assert!(!board.can_place(&line, 4, 0)); // sticks out on the right
///
/// board.place(&line, PieceColor::Red, 0, 0);
/// assert!(!board.can_place(&line, 0, 0));
/// assert_eq!(board.occupied_count(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const SIZE: usize = GRID_SIZE;

    pub const EMPTY: Self = Self {
        cells: [[Cell::Empty; GRID_SIZE]; GRID_SIZE],
    };

    /// Returns the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside the board.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y][x]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; GRID_SIZE]> {
        self.cells.iter()
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_occupied())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    /// Maps a shape offset at origin `(x, y)` to a board position, if on the board.
    fn target(x: isize, y: isize, dx: usize, dy: usize) -> Option<(usize, usize)> {
        let tx = usize::try_from(x.checked_add_unsigned(dx)?).ok()?;
        let ty = usize::try_from(y.checked_add_unsigned(dy)?).ok()?;
        (tx < GRID_SIZE && ty < GRID_SIZE).then_some((tx, ty))
    }

    /// Checks whether `shape` fits with its top-left corner at `(x, y)`.
    ///
    /// Every filled sub-cell must land inside the board on an empty cell.
    /// The origin itself may lie off the board.
    #[must_use]
    pub fn can_place(&self, shape: &Shape, x: isize, y: isize) -> bool {
        shape.cells().all(|(dx, dy)| {
            Self::target(x, y, dx, dy).is_some_and(|(tx, ty)| self.cells[ty][tx].is_empty())
        })
    }

    /// Occupies the cells covered by `shape` at `(x, y)` with `color`.
    ///
    /// # Panics
    ///
    /// Panics if [`Self::can_place`] does not hold for the same arguments.
    pub fn place(&mut self, shape: &Shape, color: PieceColor, x: isize, y: isize) {
        assert!(
            self.can_place(shape, x, y),
            "shape placed on an occupied or off-board cell at ({x}, {y}):\n{shape}"
        );
        for (dx, dy) in shape.cells() {
            if let Some((tx, ty)) = Self::target(x, y, dx, dy) {
                self.cells[ty][tx] = Cell::Occupied(color);
            }
        }
    }

    /// Like [`Self::place`], but returns the resulting board instead.
    ///
    /// # Panics
    ///
    /// Panics if [`Self::can_place`] does not hold for the same arguments.
    #[must_use]
    pub fn placed(&self, shape: &Shape, color: PieceColor, x: isize, y: isize) -> Self {
        let mut board = *self;
        board.place(shape, color, x, y);
        board
    }

    /// Collects every completely occupied row and column.
    #[must_use]
    pub fn find_full_lines(&self) -> FullLines {
        let mut lines = FullLines::default();
        for i in 0..GRID_SIZE {
            if self.cells[i].iter().all(|cell| cell.is_occupied()) {
                lines.rows.push(i);
            }
            if self.cells.iter().all(|row| row[i].is_occupied()) {
                lines.cols.push(i);
            }
        }
        lines
    }

    /// Empties every cell of the listed rows and columns.
    ///
    /// Clearing only ever empties cells, so a cell at the intersection of a
    /// cleared row and a cleared column ends up empty just once.
    pub fn clear_lines(&mut self, lines: &FullLines) {
        for &y in lines.rows() {
            self.cells[y] = [Cell::Empty; GRID_SIZE];
        }
        for &x in lines.cols() {
            for row in &mut self.cells {
                row[x] = Cell::Empty;
            }
        }
    }

    /// Iterates over every on-board origin where `shape` fits, row by row.
    pub fn legal_origins<'a>(
        &'a self,
        shape: &'a Shape,
    ) -> impl Iterator<Item = (isize, isize)> + 'a {
        (0..GRID_EXTENT)
            .flat_map(|y| (0..GRID_EXTENT).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.can_place(shape, x, y))
    }

    /// Checks whether `shape` fits at any origin on the board.
    #[must_use]
    pub fn can_place_anywhere(&self, shape: &Shape) -> bool {
        self.legal_origins(shape).next().is_some()
    }

    /// Checks whether any of the given pieces can be placed somewhere.
    ///
    /// Empty slots are skipped; with no pieces at all the answer is `false`.
    /// Every origin of the board is tried for every piece.
    pub fn has_any_legal_move<'a, I>(&self, pieces: I) -> bool
    where
        I: IntoIterator<Item = Option<&'a Piece>>,
    {
        pieces
            .into_iter()
            .flatten()
            .any(|piece| self.can_place_anywhere(piece.shape()))
    }

    /// Creates a `Board` from ASCII art for testing.
    ///
    /// `.` is an empty cell, `#` an occupied blue cell, and a palette letter
    /// (see [`PieceColor::as_char`]) an occupied cell of that colour. Other
    /// characters (e.g. spaces) are ignored. Rows are listed top to bottom;
    /// missing trailing rows stay empty.
    ///
    /// # Panics
    ///
    /// Panics if a row does not have exactly 8 cells or there are more than 8 rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= GRID_SIZE,
            "expected at most {GRID_SIZE} rows, got {}",
            lines.len()
        );

        for (y, line) in lines.iter().enumerate() {
            let cells: Vec<Cell> = line
                .chars()
                .filter_map(|ch| match ch {
                    '.' => Some(Cell::Empty),
                    '#' => Some(Cell::Occupied(PieceColor::Blue)),
                    _ => PieceColor::from_char(ch).map(Cell::Occupied),
                })
                .collect();
            assert_eq!(
                cells.len(),
                GRID_SIZE,
                "Each row must have exactly {GRID_SIZE} cells, got {} at row {y}",
                cells.len()
            );
            board.cells[y].copy_from_slice(&cells);
        }
        board
    }
}
