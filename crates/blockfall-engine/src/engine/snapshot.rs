use serde::Serialize;

use crate::core::{BOARD_WIDTH, Piece, PieceKind, PiecePosition};

/// Read-only view of a game for presentation and export.
///
/// Cells use the color id encoding: `0` is empty, `1..=7` is a piece kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Locked cells, top row first.
    pub board: Vec<[u8; BOARD_WIDTH]>,
    pub current: PieceSnapshot,
    pub next: PieceSnapshot,
    pub score: u64,
    pub level: u32,
    pub drop_interval_ms: u64,
    pub paused: bool,
    pub game_over: bool,
    pub lines: usize,
    pub pieces: usize,
}

/// A piece's kind, color, shape matrix, and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub color_id: u8,
    pub shape: Vec<Vec<u8>>,
    pub position: PiecePosition,
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            color_id: piece.color_id(),
            shape: piece.shape().to_color_ids(),
            position: piece.position(),
        }
    }
}
