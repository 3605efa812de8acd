use blockfall_engine::{Block, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

/// Preview panel for a single piece, such as the next piece.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: Piece) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    /// Fits every spawn shape: four cells wide, two tall once empty rows are dropped.
    pub fn width(&self) -> u16 {
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Returns the rows of the piece's shape that contain at least one cell.
fn visible_rows(piece: &Piece) -> Vec<&[Block]> {
    piece
        .shape()
        .rows()
        .filter(|row| row.iter().any(|block| !block.is_empty()))
        .collect()
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let empty_block = BlockDisplay::from_block(Block::Empty, false);
        let Some(piece) = &self.piece else {
            Widget::render(&empty_block, area, buf);
            return;
        };

        let rows = visible_rows(piece);
        let width = u16::try_from(piece.shape().width()).unwrap_or(u16::MAX);
        let height = u16::try_from(rows.len()).unwrap_or(u16::MAX);
        let piece_area = area.centered(
            Constraint::Length(width * BlockDisplay::width()),
            Constraint::Length(height * BlockDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (grid_row, row) in grid_rows.zip(rows) {
            for (grid_cell, block) in grid_row.into_iter().zip(row) {
                Widget::render(&BlockDisplay::from_block(*block, false), grid_cell, buf);
            }
        }
    }
}
