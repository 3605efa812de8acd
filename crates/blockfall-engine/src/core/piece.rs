use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{
    BOARD_WIDTH,
    board::{Block, Board},
};

/// Largest bounding box of any piece shape (the I-piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Horizontal offsets tried, in order, when a rotation collides.
///
/// The second attempt shifts one cell left; the third shifts one cell right
/// of the original position. There are no per-kind tables and no floor kicks.
const KICK_OFFSETS: [i32; 3] = [0, -1, 1];

/// A falling piece (tetromino) with its current shape and position.
///
/// Pieces are values: movement and rotation return new `Piece` instances, and
/// the engine decides whether to accept them after a collision test.
///
/// # Coordinate System
///
/// - Position is the board coordinate of the shape's top-left cell
/// - X increases rightward, Y increases downward
/// - Y may be negative while a piece is entering from above the board
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::T);
/// assert_eq!(piece.position().y(), 0);
///
/// let moved = piece.moved(1, 0);
/// assert_eq!(moved.position().x(), piece.position().x() + 1);
///
/// let rotated = piece.rotated_clockwise();
/// assert_eq!(rotated.kind(), PieceKind::T);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece of the given kind at its spawn position.
    ///
    /// The spawn position is `y = 0` with the rotation-0 bounding box
    /// horizontally centered on the board.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn new(kind: PieceKind) -> Self {
        let shape = kind.spawn_shape();
        let x = (BOARD_WIDTH / 2) as i32 - i32::from(shape.width) / 2;
        Self {
            kind,
            shape,
            position: PiecePosition::new(x, 0),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns the color id written into the board when this piece locks.
    #[must_use]
    pub fn color_id(&self) -> u8 {
        self.kind.color_id()
    }

    /// Returns the same piece placed at another position.
    #[must_use]
    pub fn with_position(&self, position: PiecePosition) -> Self {
        Self { position, ..*self }
    }

    /// Returns an iterator of absolute board coordinates covered by the piece.
    ///
    /// Coordinates may lie outside the board; callers must bounds-check.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let PiecePosition { x, y } = self.position;
        self.shape
            .occupied_offsets()
            .map(move |(dx, dy)| (x + dx as i32, y + dy as i32))
    }

    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        self.with_position(self.position.offset(dx, dy))
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.moved(0, 1)
    }

    /// Rotates the shape 90° clockwise in place, without any collision check.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        Self {
            shape: self.shape.rotated_clockwise(),
            ..*self
        }
    }

    /// Rotates clockwise and applies the wall kick if the rotated piece collides.
    ///
    /// Returns `None` when every kick offset collides; the caller keeps the
    /// original piece unchanged in that case.
    #[must_use]
    pub fn kicked_rotation(&self, board: &Board) -> Option<Self> {
        let rotated = self.rotated_clockwise();
        KICK_OFFSETS
            .iter()
            .map(|&dx| rotated.moved(dx, 0))
            .find(|piece| !board.is_colliding(piece))
    }

    /// Returns the position this piece would lock at if hard-dropped now.
    #[must_use]
    pub fn simulate_drop_position(&self, board: &Board) -> Self {
        let mut dropped = *self;
        while !board.is_colliding(&dropped.down()) {
            dropped = dropped.down();
        }
        dropped
    }
}

/// Position of a piece's top-left bounding-box cell on the board.
///
/// Signed, because pieces may sit partially above the board (negative `y`)
/// or have empty columns that overhang the side walls (negative `x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// The seven piece kinds.
///
/// The discriminant doubles as the color id stored in board cells, so the
/// kinds are numbered `1..=7` and `0` stays free for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 1,
    /// J-piece.
    J = 2,
    /// L-piece.
    L = 3,
    /// O-piece.
    O = 4,
    /// S-piece.
    S = 5,
    /// T-piece.
    T = 6,
    /// Z-piece.
    Z = 7,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    /// All kinds in color id order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Returns the color id (`1..=7`) used for this kind in board cells.
    #[must_use]
    pub const fn color_id(self) -> u8 {
        self as u8
    }

    /// Returns the rotation-0 shape of this kind.
    #[must_use]
    pub const fn spawn_shape(self) -> Shape {
        SPAWN_SHAPES[self as usize - 1]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Cell matrix of a piece inside its bounding box.
///
/// Stored as a fixed 4×4 array; only the top-left `width × height` region is
/// meaningful. Each cell is either [`Block::Empty`] or [`Block::Piece`]
/// carrying the owning kind, so a shape is also its own color map.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[Block; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .rows()
            .map(|row| row.iter().map(|b| char::from(b'0' + b.color_id())).collect())
            .collect();
        f.debug_tuple("Shape").field(&rows).finish()
    }
}

impl Shape {
    /// Builds a square shape from an occupancy pattern.
    #[expect(clippy::cast_possible_truncation)]
    const fn from_pattern(
        kind: PieceKind,
        size: usize,
        pattern: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    ) -> Self {
        let mut cells = [[Block::Empty; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                if pattern[y][x] {
                    cells[y][x] = Block::Piece(kind);
                }
                x += 1;
            }
            y += 1;
        }
        Self {
            width: size as u8,
            height: size as u8,
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    /// Returns an iterator over the rows of the bounding box.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> + '_ {
        self.cells[..self.height()]
            .iter()
            .map(|row| &row[..self.width()])
    }

    /// Returns an iterator of `(dx, dy)` offsets of occupied cells.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, block)| !block.is_empty())
                .map(move |(dx, _)| (dx, dy))
        })
    }

    /// Returns the shape as rows of color ids (`0` for empty cells).
    #[must_use]
    pub fn to_color_ids(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|block| block.color_id()).collect())
            .collect()
    }

    /// Rotates 90° clockwise: transpose with the row order reversed.
    ///
    /// Non-square shapes rotate within their own bounding box, so width and
    /// height swap.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let (width, height) = (self.width(), self.height());
        let mut cells = [[Block::Empty; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (new_y, new_row) in cells.iter_mut().enumerate().take(width) {
            for (new_x, cell) in new_row.iter_mut().enumerate().take(height) {
                *cell = self.cells[height - 1 - new_x][new_y];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

const SPAWN_SHAPES: [Shape; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        Shape::from_pattern(PieceKind::I, 4, [EEEE, [C, C, C, C], EEEE, EEEE]),
        // J-piece
        Shape::from_pattern(PieceKind::J, 3, [[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
        // L-piece
        Shape::from_pattern(PieceKind::L, 3, [[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
        // O-piece
        Shape::from_pattern(PieceKind::O, 2, [[C, C, E, E], [C, C, E, E], EEEE, EEEE]),
        // S-piece
        Shape::from_pattern(PieceKind::S, 3, [[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        // T-piece
        Shape::from_pattern(PieceKind::T, 3, [[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
        // Z-piece
        Shape::from_pattern(PieceKind::Z, 3, [[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
    ]
};
