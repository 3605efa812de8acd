use std::time::Duration;

use blockfall_engine::{GameEngine, SessionState};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    tui::{App, RenderMode, Runtime},
    ui::widgets::SessionDisplay,
};

/// Interactive game: maps keys to engine commands and feeds it frame time.
#[derive(Debug)]
pub struct PlayApp {
    engine: GameEngine,
    fps: f64,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(engine: GameEngine, fps: f64) -> Self {
        Self {
            engine,
            fps,
            is_exiting: false,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left => _ = self.engine.move_left(),
            KeyCode::Right => _ = self.engine.move_right(),
            KeyCode::Down => _ = self.engine.soft_drop(),
            KeyCode::Up => _ = self.engine.rotate(),
            KeyCode::Char(' ') => _ = self.engine.hard_drop(),
            KeyCode::Char('p' | 'P') => self.engine.toggle_pause(),
            KeyCode::Char('r' | 'R') => self.engine.reset(),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn help_text(&self) -> &'static str {
        match self.engine.state() {
            SessionState::Playing => {
                "← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Space (Hard Drop) | P (Pause) | R (Reset) | Q (Quit)"
            }
            SessionState::Paused => "P (Resume) | R (Reset) | Q (Quit)",
            SessionState::GameOver => "R (New Game) | Q (Quit)",
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(self.fps));
        runtime.set_render_mode(RenderMode::throttled_from_rate(self.fps));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_press_event() {
            self.handle_key(key.code);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.engine, true);
        let help_text = Text::from(self.help_text())
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(25), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime, delta: Duration) {
        self.engine.tick(delta);
    }
}
