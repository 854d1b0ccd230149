// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardfall Bot.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng, rngs::StdRng};

use cardfall_bot::{LowestColumn, RandomStrategy, engine};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyKind {
    /// Steer to the emptiest column and hard drop.
    Lowest,
    /// Random actions.
    Random,
}

#[derive(Debug, Parser)]
struct Cli {
    /// Number of games to play.
    #[clap(long, short, default_value_t = 10)]
    games: usize,
    /// Seed for reproducible games.
    #[clap(long, short)]
    seed: Option<u64>,
    /// The bot strategy.
    #[clap(long, value_enum, default_value_t = StrategyKind::Lowest)]
    strategy: StrategyKind,
    /// Game time in milliseconds for each step.
    #[clap(long, default_value_t = 100)]
    tick_ms: u64,
    /// Maximum number of steps in a game.
    #[clap(long, default_value_t = 1_000_000)]
    max_ticks: u64,
    /// The number of board columns.
    #[clap(long, default_value_t = 5)]
    width: usize,
    /// The number of board rows.
    #[clap(long, default_value_t = 10)]
    height: usize,
    /// The number of 52 cards sets in the deck.
    #[clap(long, default_value_t = 10)]
    decks: usize,
    /// The initial time between falls in milliseconds.
    #[clap(long, default_value_t = 1_000)]
    fall_interval: u64,
    /// The fall interval factor applied when rows are cleared.
    #[clap(long, default_value_t = 0.95)]
    speed_factor: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let config = cardfall_bot::Config {
        engine: engine::Config {
            board_width: cli.width,
            board_height: cli.height,
            deck_multiplicity: cli.decks,
            initial_fall_interval_ms: cli.fall_interval,
            speed_factor: cli.speed_factor,
        },
        games: cli.games,
        seed: cli.seed,
        tick_ms: cli.tick_ms,
        max_ticks: cli.max_ticks,
    };

    let high_scores = match cli.strategy {
        StrategyKind::Lowest => cardfall_bot::run(config, || LowestColumn)?,
        StrategyKind::Random => {
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };

            cardfall_bot::run(config, || RandomStrategy::new(rng.random()))?
        }
    };

    println!("High scores:");
    print!("{high_scores}");

    Ok(())
}
