use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// Trait for TUI applications run by [`Runtime::run`].
pub trait App {
    /// Called once before the event loop starts. Use this to set the tick
    /// rate and render mode.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by `delta`, the wall-clock time since the
    /// previous tick.
    fn update(&mut self, runtime: &mut Runtime, delta: Duration);
}
