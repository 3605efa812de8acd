//! Terminal event loop hosting the game.
//!
//! [`Runtime::run`] owns the terminal and dispatches three kinds of events to
//! an [`App`]: ticks carrying the measured time since the previous tick,
//! render requests, and crossterm input events.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
