use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{GameEngine, PieceGenerator, PieceSeed};
use clap::{Parser, Subcommand};
use log::info;
use rand::Rng as _;

use crate::{config::Config, logging};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write log records to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Run a headless game with synthetic time and print the final state as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Options shared by every mode that starts a game.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GameArg {
    /// Piece sequence seed as 32 hex characters (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// TOML file overriding the game rules
    #[clap(long)]
    config: Option<PathBuf>,
}

impl GameArg {
    /// Builds an engine from the configured rules and seed.
    ///
    /// Returns the seed actually used so the game can be replayed.
    pub(crate) fn build_engine(&self) -> anyhow::Result<(GameEngine, PieceSeed)> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        info!("starting game with seed {seed}");
        let engine = GameEngine::with_rules(config.rules, PieceGenerator::with_seed(seed));
        Ok((engine, seed))
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.log_file.as_deref()).context("Failed to initialize logging")?;

    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}
