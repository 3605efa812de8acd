//! Board and piece data structures.
//!
//! - [`Board`] - The fixed 10×20 grid of locked cells
//! - [`Block`] - A single cell, empty or locked by a piece kind
//! - [`Piece`] - The falling piece: kind, shape matrix, and position
//! - [`PieceKind`] - The seven tetromino kinds and their spawn shapes
//! - [`Shape`] - A piece's cell matrix inside its bounding box

pub use self::{board::*, piece::*};

mod board;
mod piece;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;
