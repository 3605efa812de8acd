//! A falling-block puzzle game engine.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - The board, pieces, shapes, and collision
//! - [`engine`] - Rules, scoring, timing, and the [`GameEngine`] state machine
//!
//! The engine has no clock and no I/O. A host feeds it player commands and
//! elapsed time, and reads back a [`GameSnapshot`] to draw.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
