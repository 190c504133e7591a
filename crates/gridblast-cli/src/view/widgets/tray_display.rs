use gridblast_engine::{MAX_SHAPE_SIZE, Piece, PieceSlots, SLOT_COUNT};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, Widget},
};

use super::{CellDisplay, style};

/// The three pieces the player chooses from.
///
/// The selected slot gets a highlighted border. Pieces that fit nowhere on
/// the board are drawn dimmed.
#[derive(Debug)]
pub struct TrayDisplay<'a> {
    slots: &'a PieceSlots,
    selected: Option<usize>,
    playable: [bool; SLOT_COUNT],
}

impl<'a> TrayDisplay<'a> {
    pub fn new(slots: &'a PieceSlots) -> Self {
        Self {
            slots,
            selected: None,
            playable: [true; SLOT_COUNT],
        }
    }

    pub fn selected(self, selected: usize) -> Self {
        Self {
            selected: Some(selected),
            ..self
        }
    }

    pub fn playable(self, playable: [bool; SLOT_COUNT]) -> Self {
        Self { playable, ..self }
    }

    #[expect(clippy::cast_possible_truncation)]
    const SLOT_WIDTH: u16 = MAX_SHAPE_SIZE as u16 * CellDisplay::WIDTH + 2;
    #[expect(clippy::cast_possible_truncation)]
    const SLOT_HEIGHT: u16 = MAX_SHAPE_SIZE as u16 * CellDisplay::HEIGHT + 2;
    const SPACING: u16 = 1;

    #[expect(clippy::cast_possible_truncation)]
    pub const fn width() -> u16 {
        SLOT_COUNT as u16 * (Self::SLOT_WIDTH + Self::SPACING) - Self::SPACING
    }

    pub const fn height() -> u16 {
        Self::SLOT_HEIGHT
    }

    fn render_slot(&self, index: usize, piece: Option<&Piece>, area: Rect, buf: &mut Buffer) {
        let border = if self.selected == Some(index) {
            style::BORDER_SELECTED
        } else {
            style::BORDER
        };
        let frame = BlockWidget::bordered()
            .border_style(border)
            .title(Line::from(format!(" {} ", index + 1)).centered())
            .style(style::DEFAULT);
        let inner = frame.inner(area);
        frame.render(area, buf);

        let Some(piece) = piece else {
            return;
        };
        let shape = piece.shape();
        let filled = if self.playable[index] {
            CellDisplay::new(style::piece(piece.color()), "")
        } else {
            CellDisplay::DIMMED
        };

        let cols = (0..shape.width()).map(|_| Constraint::Length(CellDisplay::WIDTH));
        let rows = (0..shape.height()).map(|_| Constraint::Length(CellDisplay::HEIGHT));
        let horizontal = Layout::horizontal(cols).flex(Flex::Center);
        let vertical = Layout::vertical(rows).flex(Flex::Center);

        for (dy, row) in inner.layout_vec(&vertical).into_iter().enumerate() {
            for (dx, cell_area) in row.layout_vec(&horizontal).into_iter().enumerate() {
                if shape.is_filled(dx, dy) {
                    filled.render(cell_area, buf);
                } else {
                    CellDisplay::BLANK.render(cell_area, buf);
                }
            }
        }
    }
}

impl Widget for TrayDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &TrayDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let slot_areas = area.layout::<SLOT_COUNT>(
            &Layout::horizontal([Constraint::Length(TrayDisplay::SLOT_WIDTH); SLOT_COUNT])
                .flex(Flex::Center)
                .spacing(TrayDisplay::SPACING),
        );
        for (index, (piece, slot_area)) in self.slots.iter().zip(slot_areas).enumerate() {
            let [slot_area] = Layout::vertical([Constraint::Length(TrayDisplay::SLOT_HEIGHT)])
                .areas(slot_area);
            self.render_slot(index, piece, slot_area, buf);
        }
    }
}
