use blockfall_engine::{GameEngine, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Color,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, PieceDisplay, StatsDisplay, style};

/// Full game view: statistics, board, and next piece side by side.
///
/// Draws a popup over the board while paused or after game over.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    engine: &'a GameEngine,
    show_ghost: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(engine: &'a GameEngine, show_ghost: bool) -> Self {
        Self {
            engine,
            show_ghost,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    fn border_color(&self) -> Color {
        match self.engine.state() {
            SessionState::Playing => style::BORDER_PLAYING,
            SessionState::Paused => style::BORDER_PAUSED,
            SessionState::GameOver => style::BORDER_GAME_OVER,
        }
    }

    fn panel(&self, title: &'a str) -> Block<'a> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::symmetric(
                self.horizontal_padding,
                self.vertical_padding,
            ))
            .border_style(self.border_color())
            .style(style::DEFAULT)
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let engine = self.engine;

        let game_board = {
            let widget = BoardDisplay::new(engine.board())
                .falling_piece(*engine.current_piece())
                .block(
                    Block::bordered()
                        .border_style(self.border_color())
                        .style(style::DEFAULT),
                );
            if self.show_ghost && engine.state().is_playing() {
                widget.ghost(engine.drop_preview())
            } else {
                widget
            }
        };
        let next_panel = PieceDisplay::new()
            .piece(*engine.next_piece())
            .block(self.panel("NEXT"));
        let snapshot = engine.snapshot();
        let stats = StatsDisplay::new(&snapshot, engine.stats()).block(self.panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        let popup = match engine.state() {
            SessionState::Playing => None,
            SessionState::Paused => Some(("PAUSED", style::PAUSED)),
            SessionState::GameOver => Some(("GAME OVER!!", style::GAME_OVER)),
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
