//! Game rules, timing, and state management.
//!
//! This module builds the playable game on top of the [`core`](crate::core)
//! data structures:
//!
//! - [`GameEngine`] - The game state and every command that changes it
//! - [`GameStats`] - Score, level, line clear counts, and play time
//! - [`Rules`] - Scoring table, level threshold, and drop speed curve
//! - [`DropTimer`] - Accumulator driving automatic drops
//! - [`PieceGenerator`] / [`PieceSeed`] - Seeded uniform piece selection
//! - [`GameSnapshot`] - Read-only view for rendering and export
//!
//! # Game Flow
//!
//! 1. Create a [`GameEngine`], optionally with a seed or custom rules
//! 2. Forward player commands (move, rotate, soft drop, hard drop, pause)
//! 3. Call [`GameEngine::tick`] with the elapsed time every frame
//! 4. Locks clear lines, score, and promote the next piece
//! 5. The game ends when a promoted piece collides at spawn; [`GameEngine::reset`]
//!    starts over
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::GameEngine;
//!
//! let mut engine = GameEngine::new();
//! while !engine.is_game_over() {
//!     engine.rotate();
//!     engine.hard_drop();
//!     engine.tick(Duration::from_millis(16));
//! }
//! assert!(engine.stats().completed_pieces() > 0);
//! ```

pub use self::{
    drop_timer::*, game_engine::*, game_stats::*, piece_generator::*, rules::*, snapshot::*,
};

mod drop_timer;
mod game_engine;
mod game_stats;
mod piece_generator;
mod rules;
mod snapshot;
