use gridblast_engine::{GameSession, SLOT_COUNT, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, Ghost, StatsDisplay, TrayDisplay, style};

/// Short message drawn over the board, such as `COMBO x3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub style: Style,
}

/// Whole game screen: stats, board with the cursor preview, and tray.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    selected: usize,
    cursor: (isize, isize),
    banner: Option<&'a Banner>,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, selected: usize, cursor: (isize, isize)) -> Self {
        Self {
            session,
            selected,
            cursor,
            banner: None,
        }
    }

    pub fn banner(self, banner: Option<&'a Banner>) -> Self {
        Self { banner, ..self }
    }

    /// Total height needed to draw everything.
    pub fn height(&self) -> u16 {
        let board = BoardDisplay::new(self.session.board()).block(Block::bordered());
        let stats = StatsDisplay::new(self.session).block(Block::bordered());
        u16::max(board.height(), stats.height()) + 1 + TrayDisplay::height()
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.session.session_state();
        let border_style = match state {
            SessionState::Playing => style::BORDER,
            SessionState::GameOver => style::BORDER_GAME_OVER,
        };
        let is_playing = state.is_playing();

        let board = {
            let widget = BoardDisplay::new(self.session.board()).block(
                Block::bordered()
                    .title(Line::from("GRIDBLAST").centered())
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
            match self.session.slots().get(self.selected) {
                Some(piece) if is_playing => widget.ghost(Ghost {
                    shape: piece.shape(),
                    origin: self.cursor,
                    valid: self
                        .session
                        .can_place(self.selected, self.cursor.0, self.cursor.1),
                }),
                _ => widget,
            }
        };
        let playable: [bool; SLOT_COUNT] =
            std::array::from_fn(|slot| self.session.is_slot_playable(slot));
        let tray = TrayDisplay::new(self.session.slots())
            .selected(self.selected)
            .playable(playable);
        let stats = StatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [top_area, tray_area] = Layout::vertical([
            Constraint::Length(u16::max(board.height(), stats.height())),
            Constraint::Length(TrayDisplay::height()),
        ])
        .spacing(1)
        .areas(area);

        let [stats_area, board_area, _] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
            Constraint::Length(stats.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(top_area);
        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(stats_area);
        let [board_area] = Layout::vertical([Constraint::Length(board.height())]).areas(board_area);
        let [tray_area] = Layout::horizontal([Constraint::Length(TrayDisplay::width())])
            .flex(Flex::Center)
            .areas(tray_area);

        stats.render(stats_area, buf);
        board.render(board_area, buf);
        tray.render(tray_area, buf);

        let popup = match state {
            SessionState::GameOver => Some(("GAME OVER!!", style::GAME_OVER_POPUP)),
            SessionState::Playing => self
                .banner
                .map(|banner| (banner.text.as_str(), banner.style)),
        };
        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let area =
                board_area.centered(Constraint::Length(board_area.width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            Text::styled(text, style)
                .centered()
                .render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use gridblast_engine::SHAPE_CATALOG;

    use super::*;
    use crate::testing::repeat_session;

    fn render_to_string(display: &SessionDisplay<'_>) -> String {
        let area = Rect::new(0, 0, 80, display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_game_over_popup() {
        // Four 3x3 squares leave no room for a fifth.
        let mut session = repeat_session(SHAPE_CATALOG[10], 0);
        let mut slots = [0, 1, 2, 0].into_iter();
        for (x, y) in [(0, 0), (3, 0), (0, 3), (3, 3)] {
            session.try_place_piece(slots.next().unwrap(), x, y).unwrap();
        }
        assert!(session.session_state().is_game_over());

        let text = render_to_string(&SessionDisplay::new(&session, 1, (0, 0)));
        assert!(text.contains("GAME OVER!!"));
    }

    #[test]
    fn test_banner_is_drawn_while_playing() {
        let session = repeat_session(SHAPE_CATALOG[0], 0);
        let banner = Banner {
            text: "COMBO x2".to_owned(),
            style: style::COMBO_BANNER,
        };
        let text =
            render_to_string(&SessionDisplay::new(&session, 0, (0, 0)).banner(Some(&banner)));
        assert!(text.contains("COMBO x2"));
        assert!(text.contains("SCORE:"));
        assert!(!text.contains("GAME OVER"));
    }
}
