use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

/// Events produced by the event loop.
#[derive(Debug, Clone)]
pub(super) enum TuiEvent {
    /// Time to update, with the time elapsed since the previous tick.
    Tick(Duration),
    /// Time to redraw.
    Render,
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
}
