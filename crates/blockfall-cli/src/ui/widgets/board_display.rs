use std::iter;

use blockfall_engine::{Block, Board, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

/// The locked cells with the falling piece and its landing preview on top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<Piece>,
    falling_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            falling_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: Piece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub fn falling_piece(self, piece: Piece) -> Self {
        Self {
            falling_piece: Some(piece),
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
        Board::WIDTH as u16 * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        Board::HEIGHT as u16 * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    /// Resolves what to draw in every cell.
    ///
    /// The falling piece hides the ghost where they overlap, and cells above
    /// the top edge are not drawn.
    fn cells(&self) -> Vec<[BlockDisplay; Board::WIDTH]> {
        let mut cells: Vec<_> = self
            .board
            .rows()
            .map(|row| row.map(|block| BlockDisplay::from_block(block, true)))
            .collect();

        let mut paint = |piece: &Piece, display: BlockDisplay| {
            for (x, y) in piece.occupied_positions() {
                let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                    continue;
                };
                if let Some(cell) = cells.get_mut(y).and_then(|row| row.get_mut(x)) {
                    *cell = display;
                }
            }
        };
        if let Some(ghost) = &self.ghost {
            paint(ghost, BlockDisplay::ghost());
        }
        if let Some(piece) = &self.falling_piece {
            paint(piece, BlockDisplay::from_block(Block::Piece(piece.kind()), true));
        }
        cells
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

        let col_constraints =
            (0..Board::WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..Board::HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Board::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Board::WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.cells()) {
            for (grid_cell, display) in iter::zip(grid_row, row) {
                display.render(grid_cell, buf);
            }
        }
    }
}
