use gridblast_engine::Cell;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// One board cell, two terminal columns wide.
#[derive(Debug, Clone, Copy)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const BLANK: Self = Self::new(style::EMPTY, "");
    pub const DIMMED: Self = Self::new(style::DIMMED, "");

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn from_cell(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::new(style::EMPTY_DOT, "."),
            Cell::Occupied(color) => Self::new(style::piece(color), ""),
        }
    }

    /// Preview of a piece under the cursor.
    pub const fn ghost(valid: bool) -> Self {
        if valid {
            Self::new(style::GHOST_VALID, "[]")
        } else {
            Self::new(style::GHOST_INVALID, "><")
        }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area, not just the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
