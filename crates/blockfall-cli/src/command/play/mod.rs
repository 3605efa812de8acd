use std::ops::RangeInclusive;

use crate::tui::Runtime;

use self::app::PlayApp;

use super::GameArg;

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    pub(super) game: GameArg,
    /// Ticks and frames per second
    #[clap(long, default_value_t = 60.0, value_parser = parse_fps)]
    fps: f64,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            game: GameArg::default(),
            fps: 60.0,
        }
    }
}

const FPS_RANGE: RangeInclusive<f64> = 0.1..=1000.0;

fn parse_fps(s: &str) -> Result<f64, String> {
    let fps: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if FPS_RANGE.contains(&fps) {
        Ok(fps)
    } else {
        Err(format!(
            "fps must be between {} and {}, got {s}",
            FPS_RANGE.start(),
            FPS_RANGE.end()
        ))
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { game, fps } = arg;

    let (engine, _seed) = game.build_engine()?;
    let mut app = PlayApp::new(engine, *fps);
    Runtime::new().run(&mut app)?;

    let engine = app.engine();
    println!(
        "Final score: {} (level {}, {} lines)",
        engine.score(),
        engine.level(),
        engine.stats().total_cleared_lines()
    );
    Ok(())
}
