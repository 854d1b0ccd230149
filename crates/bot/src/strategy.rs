// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bot strategies.
use rand::{Rng, SeedableRng, rngs::StdRng};

use cardfall_engine::{Engine, Snapshot};

/// A player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Do nothing this step.
    Wait,
    /// Move the falling card left.
    MoveLeft,
    /// Move the falling card right.
    MoveRight,
    /// Speed up the next fall.
    SoftDrop,
    /// Drop the falling card to the bottom.
    HardDrop,
}

impl Action {
    /// Sends this action to the engine, returns the engine result.
    pub fn apply(self, engine: &mut Engine) -> bool {
        match self {
            Action::Wait => false,
            Action::MoveLeft => engine.move_left(),
            Action::MoveRight => engine.move_right(),
            Action::SoftDrop => engine.soft_drop(),
            Action::HardDrop => engine.hard_drop(),
        }
    }
}

/// A bot strategy.
pub trait Strategy {
    /// Returns the next action given the game state.
    fn execute(&mut self, snapshot: &Snapshot) -> Action;
}

/// Picks a random action at each step.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Creates a strategy with a deterministic sequence of actions.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn execute(&mut self, _snapshot: &Snapshot) -> Action {
        match self.rng.random_range(0..5) {
            0 => Action::Wait,
            1 => Action::MoveLeft,
            2 => Action::MoveRight,
            3 => Action::SoftDrop,
            _ => Action::HardDrop,
        }
    }
}

/// Steers the falling card to the emptiest column and drops it.
///
/// Ties go to the column nearest to the card, then to the leftmost one.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestColumn;

impl Strategy for LowestColumn {
    fn execute(&mut self, snapshot: &Snapshot) -> Action {
        let Some(active) = snapshot.active else {
            return Action::Wait;
        };

        let target = (0..snapshot.width)
            .max_by_key(|&x| {
                let distance = (x as i32 - active.x).unsigned_abs();
                (
                    snapshot.free_cells(x),
                    std::cmp::Reverse(distance),
                    std::cmp::Reverse(x),
                )
            })
            .map(|x| x as i32)
            .unwrap_or(active.x);

        if target < active.x {
            Action::MoveLeft
        } else if target > active.x {
            Action::MoveRight
        } else {
            Action::HardDrop
        }
    }
}
