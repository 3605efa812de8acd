use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use blockfall_engine::{GameEngine, GameSnapshot, PieceSeed, Rules};
use log::info;
use serde::Serialize;

use super::GameArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    game: GameArg,
    /// Number of ticks to run
    #[clap(long, default_value_t = 10_000)]
    ticks: u64,
    /// Simulated time between ticks, in milliseconds
    #[clap(long, default_value_t = 16)]
    delta_ms: u64,
    /// Issue a hard drop every N ticks (0 disables)
    #[clap(long, default_value_t = 0)]
    hard_drop_every: u64,
    /// Output file for the JSON report (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

/// Final state of a headless run.
#[derive(Debug, Clone, Serialize)]
struct SimulationReport {
    seed: PieceSeed,
    rules: Rules,
    ticks_run: u64,
    play_time_ms: u64,
    line_cleared_counter: [usize; 5],
    snapshot: GameSnapshot,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        game,
        ticks,
        delta_ms,
        hard_drop_every,
        output,
    } = arg;

    let (mut engine, seed) = game.build_engine()?;
    let ticks_run = simulate(
        &mut engine,
        *ticks,
        Duration::from_millis(*delta_ms),
        *hard_drop_every,
    );
    info!(
        "simulation finished after {ticks_run} ticks: score {}, level {}, game over {}",
        engine.score(),
        engine.level(),
        engine.is_game_over()
    );

    let report = SimulationReport {
        seed,
        rules: engine.rules().clone(),
        ticks_run,
        play_time_ms: u64::try_from(engine.stats().play_time().as_millis()).unwrap_or(u64::MAX),
        line_cleared_counter: *engine.stats().line_cleared_counter(),
        snapshot: engine.snapshot(),
    };
    write_report(&report, output.as_deref())
}

/// Feeds `ticks` fixed deltas to the engine, stopping early on game over.
///
/// Returns the number of ticks actually run.
fn simulate(engine: &mut GameEngine, ticks: u64, delta: Duration, hard_drop_every: u64) -> u64 {
    for tick in 1..=ticks {
        if hard_drop_every > 0 && tick % hard_drop_every == 0 {
            engine.hard_drop();
        }
        engine.tick(delta);
        if engine.is_game_over() {
            return tick;
        }
    }
    ticks
}

fn write_report(report: &SimulationReport, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    match output {
        Some(path) => fs::write(path, format!("{json}\n"))
            .with_context(|| format!("Failed to write report to {}", path.display()))?,
        None => writeln!(io::stdout().lock(), "{json}").context("Failed to write report to stdout")?,
    }
    Ok(())
}
