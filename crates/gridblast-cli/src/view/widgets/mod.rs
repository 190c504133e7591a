use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, cell_display::*, controls_display::*, session_display::*,
    stats_display::*, tray_display::*,
};

mod board_display;
mod cell_display;
mod controls_display;
mod session_display;
mod stats_display;
mod tray_display;

mod color {
    use ratatui::style::Color;

    pub const BLUE: Color = Color::Rgb(64, 128, 255);
    pub const RED: Color = Color::Rgb(255, 64, 64);
    pub const GREEN: Color = Color::Rgb(64, 220, 64);
    pub const YELLOW: Color = Color::Rgb(255, 220, 0);
    pub const PURPLE: Color = Color::Rgb(160, 80, 255);
    pub const ORANGE: Color = Color::Rgb(255, 140, 0);
    pub const CYAN: Color = Color::Rgb(0, 220, 220);
    pub const PINK: Color = Color::Rgb(255, 105, 180);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(60, 60, 60);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use gridblast_engine::PieceColor;
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const DIMMED: Style = bg_only(color::DARK_GRAY);
    pub const GHOST_VALID: Style = fg_bg(color::BLACK, color::GREEN);
    pub const GHOST_INVALID: Style = fg_bg(color::BLACK, color::RED);

    pub const BORDER: Color = color::WHITE;
    pub const BORDER_SELECTED: Color = color::YELLOW;
    pub const BORDER_GAME_OVER: Color = color::RED;

    pub const GAME_OVER_POPUP: Style = fg_bg(color::WHITE, color::RED);
    pub const COMBO_BANNER: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const RECORD_BANNER: Style = fg_bg(color::BLACK, color::CYAN);

    pub const HELP_KEY: Style = Style::new().fg(color::CYAN);
    pub const HELP_LABEL: Style = Style::new().fg(color::WHITE);
    pub const HELP_INACTIVE: Style = Style::new().fg(color::DARK_GRAY);

    pub const fn piece(piece_color: PieceColor) -> Style {
        bg_only(match piece_color {
            PieceColor::Blue => color::BLUE,
            PieceColor::Red => color::RED,
            PieceColor::Green => color::GREEN,
            PieceColor::Yellow => color::YELLOW,
            PieceColor::Purple => color::PURPLE,
            PieceColor::Orange => color::ORANGE,
            PieceColor::Cyan => color::CYAN,
            PieceColor::Pink => color::PINK,
        })
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
