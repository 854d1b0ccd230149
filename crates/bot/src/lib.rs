// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardfall Bot.
//!
//! Plays games headless, a [Strategy] chooses an action at every step and an
//! external clock advances the engine by a fixed amount of game time.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use log::info;

use cardfall_engine::Engine;

mod scores;
pub use scores::{GameSummary, HighScore, HighScores};

mod strategy;
pub use strategy::{Action, LowestColumn, RandomStrategy, Strategy};

/// Reexport engine types.
pub use cardfall_engine as engine;

/// Bot games configuration.
#[derive(Debug)]
pub struct Config {
    /// The engine configuration used for every game.
    pub engine: engine::Config,
    /// Number of games to play.
    pub games: usize,
    /// The seed of the first game, games are seeded from the system if `None`.
    pub seed: Option<u64>,
    /// Game time in milliseconds for each step.
    pub tick_ms: u64,
    /// Maximum number of steps in a game.
    pub max_ticks: u64,
}

static NICKNAMES: &[&str] = &["Alice", "Bob", "Carol", "Dave", "Frank", "Mike"];

/// Plays games given a config and a strategy factory called for each game.
///
/// Returns the leaderboard of all the games played.
pub fn run<F, S>(config: Config, mut factory: F) -> Result<HighScores>
where
    F: FnMut() -> S,
    S: Strategy,
{
    let mut high_scores = HighScores::default();

    for idx in 0..config.games {
        let mut engine = match config.seed {
            Some(seed) => {
                Engine::with_seed(config.engine.clone(), seed.wrapping_add(idx as u64))?
            }
            None => Engine::new(config.engine.clone())?,
        };

        let mut strategy = factory();
        let summary = play_game(&mut engine, &mut strategy, config.tick_ms, config.max_ticks);

        let player = format!("{}-{idx}", NICKNAMES[idx % NICKNAMES.len()]);
        info!("Game {idx} {player}: {summary}");

        if let Some(pos) = high_scores.insert(player, summary.score) {
            info!("Game {idx} enters the high scores at position {}", pos + 1);
        }
    }

    Ok(high_scores)
}

/// Plays a game until it ends or `max_ticks` steps have been played.
///
/// At each step the strategy action is sent to the engine, the clock is
/// advanced by `tick_ms`, and the emitted events are added to the summary.
pub fn play_game<S>(
    engine: &mut Engine,
    strategy: &mut S,
    tick_ms: u64,
    max_ticks: u64,
) -> GameSummary
where
    S: Strategy + ?Sized,
{
    let mut summary = GameSummary::default();

    while !engine.is_game_over() && summary.ticks < max_ticks {
        let action = strategy.execute(&engine.snapshot());
        action.apply(engine);
        engine.tick(tick_ms);
        summary.ticks += 1;

        for event in engine.take_events() {
            summary.record(&event);
        }
    }

    summary.score = engine.score();
    summary.finished = engine.is_game_over();
    summary
}
