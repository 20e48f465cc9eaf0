//! Self-play game generation for QuorZero training.
//!
//! Plays two MCTS agents against each other and writes one binary training
//! dump per game. Games are independent, so they fan out across a rayon
//! pool; everything inside a game is sequential and seeded.

mod driver;
mod game_id;
mod heuristic;
mod record;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::info;

use quorzero_mcts::MctsConfig;

use crate::driver::SelfPlayDriver;
use crate::game_id::generate_game_id;
use crate::heuristic::ShortestPathEvaluator;

/// QuorZero self-play data generator.
#[derive(Parser)]
#[command(name = "quorzero-selfplay")]
#[command(about = "Generate self-play games for QuorZero training")]
struct Cli {
    /// Number of games to generate.
    #[arg(short, long, default_value = "10")]
    games: usize,

    /// MCTS simulations per move.
    #[arg(short, long, default_value = "400")]
    simulations: usize,

    /// Base random seed; per-game seeds are derived from it.
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Output directory for game dumps.
    #[arg(short, long, default_value = "data/games")]
    output: PathBuf,

    /// Fraction of root priors replaced with Dirichlet noise (0 disables).
    #[arg(long, default_value = "0.25")]
    exploration_fraction: f32,

    /// Log level when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("cannot create output directory {}", cli.output.display()))?;

    let config = MctsConfig {
        num_simulations: cli.simulations,
        exploration_fraction: cli.exploration_fraction,
        ..Default::default()
    };
    info!(
        games = cli.games,
        simulations = cli.simulations,
        seed = cli.seed,
        output = %cli.output.display(),
        "generating self-play games"
    );

    let start = Instant::now();
    let turn_counts = (0..cli.games)
        .into_par_iter()
        .map(|i| {
            let game_seed = cli.seed.wrapping_add(i as u64 * 1000);
            let mut driver = SelfPlayDriver::new(
                config.clone(),
                [ShortestPathEvaluator, ShortestPathEvaluator],
                game_seed,
            );
            let record = driver
                .run_single_game()
                .with_context(|| format!("game {i} (seed {game_seed})"))?;

            let mut id_rng = ChaCha8Rng::seed_from_u64(game_seed.wrapping_add(2));
            let game_id = generate_game_id(&mut id_rng);
            let path = cli.output.join(format!("{game_id}.bin"));
            record
                .dump_to_file(&path)
                .with_context(|| format!("game {i}"))?;

            info!(game = i, id = %game_id, turns = record.total_turns(), "dumped");
            Ok(record.total_turns())
        })
        .collect::<Result<Vec<usize>>>()?;

    let total_turns: usize = turn_counts.iter().sum();
    info!(
        games = cli.games,
        total_turns,
        avg_turns = total_turns as f64 / cli.games.max(1) as f64,
        elapsed_s = start.elapsed().as_secs_f64(),
        "done"
    );
    Ok(())
}
