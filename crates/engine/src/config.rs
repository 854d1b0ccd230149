// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game configuration.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cardfall_eval::ROW_LEN;

/// Engine construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The number of board columns, a full row is a poker hand.
    pub board_width: usize,
    /// The number of board rows.
    pub board_height: usize,
    /// The number of 52 cards sets in the deck.
    pub deck_multiplicity: usize,
    /// The time between falls at the start of the game.
    pub initial_fall_interval_ms: u64,
    /// The fall interval is multiplied by this factor each time rows are cleared.
    pub speed_factor: f64,
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Rows must hold exactly one poker hand.
    #[error("board width must be {len}, got {0}", len = ROW_LEN)]
    BoardWidth(usize),
    /// The board needs room to spawn and drop a card.
    #[error(
        "board height must be between 2 and {max}, got {0}",
        max = Config::MAX_BOARD_HEIGHT
    )]
    BoardHeight(usize),
    /// There must be at least one deck.
    #[error(
        "deck multiplicity must be between 1 and {max}, got {0}",
        max = Config::MAX_DECK_MULTIPLICITY
    )]
    DeckMultiplicity(usize),
    /// The fall interval must be positive.
    #[error("initial fall interval must be positive")]
    FallInterval,
    /// The speed factor must not slow down the game.
    #[error("speed factor must be in (0, 1], got {0}")]
    SpeedFactor(f64),
}

impl Config {
    /// Shortest fall interval reachable by speeding up.
    pub const MIN_FALL_INTERVAL_MS: u64 = 1;

    /// Tallest accepted board.
    pub const MAX_BOARD_HEIGHT: usize = 1_000;

    /// Largest accepted number of 52 cards sets.
    pub const MAX_DECK_MULTIPLICITY: usize = 1_000;

    /// Checks this configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width != ROW_LEN {
            return Err(ConfigError::BoardWidth(self.board_width));
        }

        if !(2..=Self::MAX_BOARD_HEIGHT).contains(&self.board_height) {
            return Err(ConfigError::BoardHeight(self.board_height));
        }

        if !(1..=Self::MAX_DECK_MULTIPLICITY).contains(&self.deck_multiplicity) {
            return Err(ConfigError::DeckMultiplicity(self.deck_multiplicity));
        }

        if self.initial_fall_interval_ms == 0 {
            return Err(ConfigError::FallInterval);
        }

        if !(self.speed_factor > 0.0 && self.speed_factor <= 1.0) {
            return Err(ConfigError::SpeedFactor(self.speed_factor));
        }

        Ok(())
    }

    /// Returns the fall interval that follows `interval_ms` after a clear.
    ///
    /// The result is never greater than `interval_ms`.
    pub fn next_fall_interval(&self, interval_ms: u64) -> u64 {
        let next = (interval_ms as f64 * self.speed_factor).round() as u64;
        next.clamp(Self::MIN_FALL_INTERVAL_MS, interval_ms.max(Self::MIN_FALL_INTERVAL_MS))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_width: ROW_LEN,
            board_height: 10,
            deck_multiplicity: 10,
            initial_fall_interval_ms: 1_000,
            speed_factor: 0.95,
        }
    }
}
