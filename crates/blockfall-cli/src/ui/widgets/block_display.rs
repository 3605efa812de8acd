use blockfall_engine::Block;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// One board cell drawn two terminal columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    /// Landing position preview of the falling piece.
    pub const fn ghost() -> Self {
        Self::new(style::GHOST, "[]")
    }

    pub const fn from_block(block: Block, show_dots: bool) -> Self {
        match block {
            Block::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Block::Empty => Self::new(style::EMPTY, ""),
            Block::Piece(kind) => Self::new(style::piece(kind), ""),
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill the whole area, not just the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
