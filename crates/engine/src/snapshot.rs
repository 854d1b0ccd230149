// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Read-only game state for renderers.
use serde::{Deserialize, Serialize};

use cardfall_cards::Card;

use crate::{board::ActiveCard, engine::PREVIEW_LEN};

/// A copy of the game state at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The number of board columns.
    pub width: usize,
    /// The number of board rows.
    pub height: usize,
    /// The grid cells in row-major order, without the falling card.
    pub cells: Vec<Option<Card>>,
    /// The falling card.
    pub active: Option<ActiveCard>,
    /// The upcoming cards, the first one falls next.
    pub preview: [Option<Card>; PREVIEW_LEN],
    /// The total score.
    pub score: u32,
    /// The current time between falls.
    pub fall_interval_ms: u64,
    /// The game has ended.
    pub game_over: bool,
}

impl Snapshot {
    /// Returns the grid card at `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> Option<Card> {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            None
        }
    }

    /// The number of empty cells at the top of column `x`.
    pub fn free_cells(&self, x: usize) -> usize {
        (0..self.height)
            .take_while(|&y| self.cell(x, y).is_none())
            .count()
    }
}
