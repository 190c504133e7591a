use std::iter;

use gridblast_engine::{Board, GRID_SIZE, Shape};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use super::CellDisplay;

/// A piece drawn over the board at the cursor.
#[derive(Debug, Clone, Copy)]
pub struct Ghost<'a> {
    pub shape: &'a Shape,
    pub origin: (isize, isize),
    /// Whether the piece can be placed there.
    pub valid: bool,
}

impl Ghost<'_> {
    fn covers(&self, x: usize, y: usize) -> bool {
        let (ox, oy) = self.origin;
        let (Ok(x), Ok(y)) = (isize::try_from(x), isize::try_from(y)) else {
            return false;
        };
        let (dx, dy) = (x - ox, y - oy);
        match (usize::try_from(dx), usize::try_from(dy)) {
            (Ok(dx), Ok(dy)) => self.shape.is_filled(dx, dy),
            _ => false,
        }
    }
}

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<Ghost<'a>>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            block: None,
        }
    }

    pub fn ghost(self, ghost: Ghost<'a>) -> Self {
        Self {
            ghost: Some(ghost),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        GRID_SIZE as u16 * CellDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        GRID_SIZE as u16 * CellDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }

    fn cell_display(&self, x: usize, y: usize) -> CellDisplay {
        match self.ghost {
            Some(ghost) if ghost.covers(x, y) => CellDisplay::ghost(ghost.valid),
            _ => CellDisplay::from_cell(self.board.cell(x, y)),
        }
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..GRID_SIZE).map(|_| Constraint::Length(CellDisplay::WIDTH));
        let row_constraints = (0..GRID_SIZE).map(|_| Constraint::Length(CellDisplay::HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<GRID_SIZE>(&vertical)
            .into_iter()
            .map(|row| row.layout::<GRID_SIZE>(&horizontal));

        for (y, grid_row) in grid_cells.enumerate() {
            for (x, grid_cell) in iter::zip(0..GRID_SIZE, grid_row) {
                self.cell_display(x, y).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use gridblast_engine::SHAPE_CATALOG;

    use super::*;

    #[test]
    fn test_ghost_covers_only_filled_cells() {
        // Small L: #. / ##
        let shape = SHAPE_CATALOG[15];
        let ghost = Ghost {
            shape: &shape,
            origin: (2, 3),
            valid: true,
        };
        assert!(ghost.covers(2, 3));
        assert!(!ghost.covers(3, 3));
        assert!(ghost.covers(2, 4));
        assert!(ghost.covers(3, 4));
        assert!(!ghost.covers(1, 3));
        assert!(!ghost.covers(2, 5));
        // Beyond the shape's bounding box.
        assert!(!ghost.covers(4, 3));
        assert!(!ghost.covers(7, 7));
    }

    #[test]
    fn test_ghost_partially_off_board() {
        let shape = SHAPE_CATALOG[7]; // 1x5 horizontal
        let ghost = Ghost {
            shape: &shape,
            origin: (-2, 0),
            valid: false,
        };
        assert!(ghost.covers(0, 0));
        assert!(ghost.covers(2, 0));
        assert!(!ghost.covers(3, 0));
    }

    #[test]
    fn test_render_draws_ghost_over_board() {
        let board = Board::from_ascii("#.......");
        let shape = SHAPE_CATALOG[0];
        let display = BoardDisplay::new(&board).ghost(Ghost {
            shape: &shape,
            origin: (1, 0),
            valid: true,
        });
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        assert_eq!(buf[(2, 0)].symbol(), "[");
        assert_eq!(buf[(3, 0)].symbol(), "]");
        assert_eq!(buf[(4, 0)].symbol(), ".");
    }
}
