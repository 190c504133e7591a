use gridblast_engine::SessionState;
use ratatui::{
    prelude::{Buffer, Rect},
    text::{Line, Span},
    widgets::Widget,
};

use super::style;

/// Player actions on the play screen, in the order they are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Move,
    Select,
    Place,
    Restart,
    Quit,
}

impl Control {
    pub const ALL: [Self; 5] = [
        Self::Move,
        Self::Select,
        Self::Place,
        Self::Restart,
        Self::Quit,
    ];

    #[must_use]
    pub const fn keys(self) -> &'static str {
        match self {
            Self::Move => "←↑↓→",
            Self::Select => "1 2 3 Tab",
            Self::Place => "Enter Space",
            Self::Restart => "R",
            Self::Quit => "Q",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Move => "Move",
            Self::Select => "Select",
            Self::Place => "Place",
            Self::Restart => "Restart",
            Self::Quit => "Quit",
        }
    }

    /// Whether the control does anything in `state`.
    #[must_use]
    pub fn is_active(self, state: SessionState) -> bool {
        match self {
            Self::Move | Self::Select | Self::Place => state.is_playing(),
            Self::Restart | Self::Quit => true,
        }
    }
}

/// One-line key help. Controls that do nothing in the current state are dimmed.
#[derive(Debug)]
pub struct ControlsDisplay {
    state: SessionState,
}

impl ControlsDisplay {
    pub fn new(state: SessionState) -> Self {
        Self { state }
    }
}

impl Widget for ControlsDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![];
        for (i, control) in Control::ALL.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", style::HELP_LABEL));
            }
            let (key_style, label_style) = if control.is_active(self.state) {
                (style::HELP_KEY, style::HELP_LABEL)
            } else {
                (style::HELP_INACTIVE, style::HELP_INACTIVE)
            };
            spans.push(Span::styled(control.keys(), key_style));
            spans.push(Span::styled(" ", label_style));
            spans.push(Span::styled(control.label(), label_style));
        }
        Line::from(spans).centered().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;

    /// Foreground colour at the start of `text` on the first line.
    fn fg_of(buf: &Buffer, text: &str) -> Option<Color> {
        let line: String = (0..buf.area.width).map(|x| buf[(x, 0)].symbol()).collect();
        let start = line.find(text)?;
        let x = line[..start].chars().count();
        buf[(u16::try_from(x).ok()?, 0)].fg.into()
    }

    fn render(state: SessionState) -> Buffer {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        ControlsDisplay::new(state).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_all_controls_active_while_playing() {
        let buf = render(SessionState::Playing);
        for control in Control::ALL {
            assert_eq!(fg_of(&buf, control.label()), style::HELP_LABEL.fg, "{control:?}");
        }
        assert_eq!(fg_of(&buf, "Enter"), style::HELP_KEY.fg);
    }

    #[test]
    fn test_placement_controls_dimmed_after_game_over() {
        let buf = render(SessionState::GameOver);
        for control in [Control::Move, Control::Select, Control::Place] {
            assert_eq!(fg_of(&buf, control.label()), style::HELP_INACTIVE.fg, "{control:?}");
        }
        assert_eq!(fg_of(&buf, "Enter"), style::HELP_INACTIVE.fg);
        assert_eq!(fg_of(&buf, "Restart"), style::HELP_LABEL.fg);
        assert_eq!(fg_of(&buf, "Quit"), style::HELP_LABEL.fg);
    }
}
