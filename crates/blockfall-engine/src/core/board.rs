use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{Piece, PieceKind},
};

/// A single board cell.
///
/// The numeric encoding seen by presentation code is the color id:
/// `0` for [`Block::Empty`] and `1..=7` for a locked piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell locked by a piece of the given kind.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Block::Empty)
    }

    /// Returns the cell value: `0` when empty, otherwise the kind's color id.
    #[must_use]
    pub const fn color_id(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Piece(kind) => kind.color_id(),
        }
    }
}

type BoardRow = [Block; BOARD_WIDTH];

const EMPTY_ROW: BoardRow = [Block::Empty; BOARD_WIDTH];

/// The grid of locked cells.
///
/// Row `0` is the top of the board. The dimensions are fixed at
/// [`Board::WIDTH`] × [`Board::HEIGHT`]; rows are only ever replaced, never
/// added or removed, so the shape invariant holds for the board's lifetime.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Block, Board, PieceKind};
///
/// let mut board = Board::EMPTY;
/// for x in 0..Board::WIDTH {
///     board.set(x, Board::HEIGHT - 1, Block::Piece(PieceKind::I));
/// }
/// assert!(board.is_full_row(Board::HEIGHT - 1));
///
/// assert_eq!(board.clear_lines(), 1);
/// assert!(!board.is_full_row(Board::HEIGHT - 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    /// Returns the cell at `(x, y)`.
    ///
    /// Bounds are the caller's responsibility; out-of-range coordinates panic.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Block {
        self.rows[y][x]
    }

    /// Overwrites the cell at `(x, y)`.
    ///
    /// Bounds are the caller's responsibility; out-of-range coordinates panic.
    pub fn set(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y][x] = block;
    }

    /// Returns the cell at signed coordinates, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Block> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.get(x).copied()
    }

    /// Returns an iterator over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block; BOARD_WIDTH]> + '_ {
        self.rows.iter()
    }

    /// Returns the board as rows of color ids (`0` for empty cells).
    #[must_use]
    pub fn to_color_ids(&self) -> Vec<[u8; BOARD_WIDTH]> {
        self.rows
            .iter()
            .map(|row| row.map(Block::color_id))
            .collect()
    }

    /// Returns whether every cell in row `y` is occupied.
    #[must_use]
    pub fn is_full_row(&self, y: usize) -> bool {
        self.rows[y].iter().all(|block| !block.is_empty())
    }

    /// Removes row `y` and inserts an empty row at the top.
    ///
    /// Every row above `y` shifts down by one; rows below are untouched.
    pub fn clear_row(&mut self, y: usize) {
        self.rows.copy_within(..y, 1);
        self.rows[0] = EMPTY_ROW;
    }

    /// Checks whether the piece overlaps a wall, the floor, or a locked cell.
    ///
    /// Cells above the board (`y < 0`) only collide with the side walls, which
    /// lets pieces spawn partially above the visible area.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece.occupied_positions().any(|(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
                return true;
            }
            y >= 0 && self.cell(x, y).is_some_and(|block| !block.is_empty())
        })
    }

    /// Locks a piece onto the board by writing its color into every covered cell.
    ///
    /// Cells outside the board are skipped. Returns how many occupied cells
    /// were above the top edge and therefore lost.
    pub fn fill_piece(&mut self, piece: &Piece) -> usize {
        let mut lost = 0;
        for (x, y) in piece.occupied_positions() {
            let (Ok(ux), Ok(uy)) = (usize::try_from(x), usize::try_from(y)) else {
                if y < 0 {
                    lost += 1;
                }
                continue;
            };
            if ux < BOARD_WIDTH && uy < BOARD_HEIGHT {
                self.rows[uy][ux] = Block::Piece(piece.kind());
            }
        }
        lost
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Rows are scanned bottom to top. After a row is cleared the same index
    /// is tested again, since the row above has just shifted into it.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        let mut y = BOARD_HEIGHT;
        while y > 0 {
            if self.is_full_row(y - 1) {
                self.clear_row(y - 1);
                count += 1;
            } else {
                y -= 1;
            }
        }
        count
    }

    /// Creates a `Board` from ASCII art, for tests and examples.
    ///
    /// `.` is an empty cell and a piece letter (`I`, `J`, `L`, `O`, `S`,
    /// `T`, `Z`) or `#` is an occupied cell (`#` is stored as an I cell).
    /// Rows are given top to bottom and aligned to the bottom of the board,
    /// so only the interesting rows need to be written.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "At most {BOARD_HEIGHT} rows are allowed, got {}",
            lines.len()
        );

        let top = BOARD_HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let cells: Vec<Block> = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match c {
                    '.' => Block::Empty,
                    '#' => Block::Piece(PieceKind::I),
                    _ => Block::Piece(
                        PieceKind::from_char(c)
                            .unwrap_or_else(|| panic!("invalid cell character: {c}")),
                    ),
                })
                .collect();
            assert_eq!(
                cells.len(),
                BOARD_WIDTH,
                "Each row must have exactly {BOARD_WIDTH} cells, got {} at row {i}",
                cells.len()
            );
            board.rows[top + i].copy_from_slice(&cells);
        }
        board
    }
}
