use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, piece_display::*, session_display::*, stats_display::*,
};

mod block_display;
mod board_display;
mod piece_display;
mod session_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    // Piece colors, indexed by kind through `style::piece`
    pub const I_PINK: Color = Color::Rgb(0xFF, 0x0D, 0x72);
    pub const J_CYAN: Color = Color::Rgb(0x0D, 0xC2, 0xFF);
    pub const L_GREEN: Color = Color::Rgb(0x0D, 0xFF, 0x72);
    pub const O_MAGENTA: Color = Color::Rgb(0xF5, 0x38, 0xFF);
    pub const S_ORANGE: Color = Color::Rgb(0xFF, 0x8E, 0x0D);
    pub const T_YELLOW: Color = Color::Rgb(0xFF, 0xE1, 0x38);
    pub const Z_BLUE: Color = Color::Rgb(0x38, 0x77, 0xFF);

    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use blockfall_engine::PieceKind;
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
    pub const GHOST: Style = fg_bg(color::GRAY, color::BLACK);
    pub const PAUSED: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);

    /// Block styles in color id order (`PIECES[id - 1]`).
    const PIECES: [Style; PieceKind::LEN] = [
        bg_only(color::I_PINK),
        bg_only(color::J_CYAN),
        bg_only(color::L_GREEN),
        bg_only(color::O_MAGENTA),
        bg_only(color::S_ORANGE),
        bg_only(color::T_YELLOW),
        bg_only(color::Z_BLUE),
    ];

    #[must_use]
    pub const fn piece(kind: PieceKind) -> Style {
        PIECES[kind.color_id() as usize - 1]
    }

    pub const BORDER_PLAYING: Color = color::WHITE;
    pub const BORDER_PAUSED: Color = color::YELLOW;
    pub const BORDER_GAME_OVER: Color = color::RED;

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
