// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Events emitted by the engine.
use serde::{Deserialize, Serialize};

use crate::board::{ActiveCard, ClearedRow};

/// A game event for renderers and other collaborators.
///
/// Events are queued by the engine and drained with
/// [Engine::take_events](crate::Engine::take_events), the engine never
/// waits for them to be handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The falling card has been placed on the grid.
    CardPlaced(ActiveCard),
    /// Completed rows have been scored and removed.
    RowsCleared {
        /// The removed rows from the bottom to the top of the board.
        rows: Vec<ClearedRow>,
        /// More than one row completed and the score was doubled.
        combo: bool,
        /// The points added to the score.
        score_delta: u32,
    },
    /// The total score has changed.
    ScoreChanged {
        /// The new total score.
        score: u32,
    },
    /// The game has ended.
    GameOver {
        /// The final score.
        score: u32,
    },
}
