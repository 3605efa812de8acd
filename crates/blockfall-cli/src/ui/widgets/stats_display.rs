use std::time::Duration;

use blockfall_engine::{GameSnapshot, GameStats};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block as BlockWidget, Paragraph, Widget},
};

use super::style;

const INNER_WIDTH: u16 = 16;

/// One row of the stats panel.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StatLine {
    Gap,
    Entry { label: &'static str, value: String },
}

impl StatLine {
    fn entry(label: &'static str, value: impl ToString) -> Self {
        Self::Entry {
            label,
            value: value.to_string(),
        }
    }

    /// Label flush left, value flush right, across `width` columns.
    fn to_line(&self, width: usize) -> Line<'static> {
        match self {
            Self::Gap => Line::default(),
            Self::Entry { label, value } => {
                let gap = width.saturating_sub(label.len() + value.len()).max(1);
                Line::from(vec![
                    Span::raw(*label),
                    Span::raw(" ".repeat(gap)),
                    Span::styled(value.clone(), Style::new().add_modifier(Modifier::BOLD)),
                ])
            }
        }
    }
}

fn stat_lines(snapshot: &GameSnapshot, stats: &GameStats) -> Vec<StatLine> {
    let counter = stats.line_cleared_counter();
    vec![
        StatLine::entry("SCORE:", snapshot.score),
        StatLine::entry("TIME:", format_play_time(stats.play_time())),
        StatLine::Gap,
        StatLine::entry("LEVEL:", snapshot.level),
        StatLine::entry("SPEED:", format!("{}ms", snapshot.drop_interval_ms)),
        StatLine::entry("LINES:", snapshot.lines),
        StatLine::entry("PIECES:", snapshot.pieces),
        StatLine::Gap,
        StatLine::entry("SINGLES:", counter[1]),
        StatLine::entry("DOUBLES:", counter[2]),
        StatLine::entry("TRIPLES:", counter[3]),
        StatLine::entry("QUADS:", counter[4]),
    ]
}

/// `m:ss.cc`, minutes unbounded.
fn format_play_time(time: Duration) -> String {
    let secs = time.as_secs();
    format!(
        "{}:{:02}.{:02}",
        secs / 60,
        secs % 60,
        time.subsec_millis() / 10
    )
}

/// Score, level, timing, and line clear counts of a game.
pub struct StatsDisplay<'a> {
    lines: Vec<StatLine>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(snapshot: &GameSnapshot, stats: &GameStats) -> Self {
        Self {
            lines: stat_lines(snapshot, stats),
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        INNER_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self
            .lines
            .iter()
            .map(|line| line.to_line(usize::from(INNER_WIDTH)))
            .collect::<Vec<_>>();
        let mut paragraph = Paragraph::new(text).style(style::DEFAULT);
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}
