mod config;
mod strategies;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use indicatif::ProgressBar;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use twenty48_core::GameEngine;

use config::SelfplayConfig;
use strategies::{direction_order, StrategyKind};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Headless self-play harness for the twenty48 rule engine"
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of games to play (overrides the config)
    #[arg(long, value_name = "N")]
    games: Option<u32>,

    /// Base seed; game i runs on base_seed + i (overrides the config)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Direction-selection strategy (overrides the config)
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Write per-game JSON records to this file (overrides the config)
    #[arg(long, value_name = "FILE")]
    results: Option<PathBuf>,
}

/// Summary of one completed game.
#[derive(Debug, Clone, Copy, Serialize)]
struct RunRecord {
    seed: u64,
    steps: u64,
    score: u32,
    highest_tile: u32,
    won: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut config = match &cli.config {
        Some(path) => SelfplayConfig::from_toml(path)?,
        None => SelfplayConfig::default(),
    };
    if let Some(games) = cli.games {
        config.num_games = games;
    }
    if let Some(seed) = cli.seed {
        config.base_seed = Some(seed);
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    if let Some(results) = cli.results {
        config.report.results_file = Some(results);
    }

    let base_seed = config.base_seed.unwrap_or_else(|| rand::random::<u64>());
    info!(
        "Playing {} game(s), strategy {:?}, base seed {}",
        config.num_games, config.strategy, base_seed
    );

    let bar = ProgressBar::new(config.num_games as u64);
    let records: Vec<RunRecord> = (0..config.num_games as u64)
        .into_par_iter()
        .map(|i| {
            let record = play_game(base_seed.wrapping_add(i), config.strategy);
            bar.inc(1);
            record
        })
        .collect();
    bar.finish_and_clear();

    summarize(&records);

    if let Some(path) = &config.report.results_file {
        let json = serde_json::to_string_pretty(&records)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote {} record(s) to {}", records.len(), path.display());
    }

    Ok(())
}

/// Play one game to completion, observing board changes at debug level the
/// way a presentation layer would consume them.
fn play_game(seed: u64, strategy: StrategyKind) -> RunRecord {
    let mut engine = GameEngine::from_seed(seed);
    engine.subscribe(move |board| {
        debug!(
            "game {seed}: score {} ({} empty)",
            board.score(),
            board.empty_count()
        );
    });

    // Keep the policy's randomness separate from the engine's spawn stream.
    let mut policy_rng = StdRng::seed_from_u64(seed ^ 0x5e1f_9a7e);
    let mut steps = 0u64;

    while !engine.board().is_game_over() {
        let mut moved = false;
        for direction in direction_order(strategy, steps, &mut policy_rng) {
            if engine.make_move(direction) {
                moved = true;
                break;
            }
        }
        if !moved {
            break;
        }
        steps += 1;
    }

    let board = engine.board();
    debug!("game {seed}: finished\n{board}");
    RunRecord {
        seed,
        steps,
        score: board.score(),
        highest_tile: board.highest_tile(),
        won: board.has_won(),
    }
}

fn summarize(records: &[RunRecord]) {
    if records.is_empty() {
        info!("No games played");
        return;
    }
    let games = records.len() as u64;
    let total_score: u64 = records.iter().map(|r| r.score as u64).sum();
    let total_steps: u64 = records.iter().map(|r| r.steps).sum();
    let best = records.iter().max_by_key(|r| r.score).expect("records is non-empty");
    let wins = records.iter().filter(|r| r.won).count();
    info!(
        "Completed {} game(s): avg score {}, best score {} (highest tile {}), {} win(s), {} total step(s)",
        games,
        total_score / games,
        best.score,
        best.highest_tile,
        wins,
        total_steps
    );
}
