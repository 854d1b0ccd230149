// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The game state machine.
use ahash::AHashSet;
use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use cardfall_cards::{Card, Deck};

use crate::{
    board::{ActiveCard, Board},
    config::{Config, ConfigError},
    event::Event,
    snapshot::Snapshot,
};

/// The number of cards in the look-ahead queue.
pub const PREVIEW_LEN: usize = 3;

/// The maximum number of draws made to replace a duplicate preview card.
pub const MAX_REPLACE_DRAWS: usize = 52;

/// The engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Cards are falling.
    Running,
    /// The game has ended, this state is final.
    GameOver,
}

/// The game engine.
///
/// The engine is driven by an external clock calling [Engine::tick] and by
/// the player commands, it never blocks and never waits on the consumers of
/// the [Event]s it emits.
#[derive(Debug)]
pub struct Engine {
    config: Config,
    board: Board,
    deck: Deck,
    rng: StdRng,
    preview: [Option<Card>; PREVIEW_LEN],
    state: EngineState,
    score: u32,
    fall_interval_ms: u64,
    fall_timer_ms: u64,
    events: Vec<Event>,
}

impl Engine {
    /// Creates a new game seeded from the operating system.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates a new game with a deterministic deck order.
    pub fn with_seed(config: Config, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let board = Board::new(config.board_width, config.board_height);
        let deck = Deck::new_and_shuffled(config.deck_multiplicity, &mut rng);

        let mut engine = Self {
            fall_interval_ms: config.initial_fall_interval_ms,
            config,
            board,
            deck,
            rng,
            preview: [None; PREVIEW_LEN],
            state: EngineState::Running,
            score: 0,
            fall_timer_ms: 0,
            events: Vec::new(),
        };

        for slot in &mut engine.preview {
            *slot = engine.deck.draw();
        }

        engine.spawn_next();

        Ok(engine)
    }

    /// Advances the clock by `elapsed_ms`.
    ///
    /// When the accumulated time reaches the fall interval the falling card
    /// moves down one row, or lands if it cannot move. Returns true if the
    /// card fell or landed.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        if self.is_game_over() {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < self.fall_interval_ms {
            return false;
        }

        self.fall_timer_ms = 0;
        if !self.board.try_move(0, 1) {
            self.land();
        }

        true
    }

    /// Moves the falling card one column to the left.
    pub fn move_left(&mut self) -> bool {
        !self.is_game_over() && self.board.try_move(-1, 0)
    }

    /// Moves the falling card one column to the right.
    pub fn move_right(&mut self) -> bool {
        !self.is_game_over() && self.board.try_move(1, 0)
    }

    /// Halves the time left before the next fall.
    pub fn soft_drop(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }

        let remaining = self.fall_interval_ms.saturating_sub(self.fall_timer_ms);
        self.fall_timer_ms += remaining / 2;
        true
    }

    /// Drops the falling card as far as it goes and lands it.
    pub fn hard_drop(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }

        while self.board.try_move(0, 1) {}
        self.land();
        true
    }

    /// Places the falling card, scores the board and spawns the next card.
    fn land(&mut self) {
        if !self.board.place_card() {
            warn!("Cannot place falling card {:?}", self.board.active());
        }

        if let Some(active) = self.board.take_active() {
            debug!("Placed {} at ({}, {})", active.card, active.x, active.y);
            self.events.push(Event::CardPlaced(active));
        }

        let cleared = self.board.check_for_completed_hands();
        if !cleared.is_empty() {
            self.score = self.score.saturating_add(cleared.score());
            self.fall_interval_ms = self.config.next_fall_interval(self.fall_interval_ms);

            self.events.push(Event::RowsCleared {
                rows: cleared.rows().to_vec(),
                combo: cleared.combo(),
                score_delta: cleared.score(),
            });
            self.events.push(Event::ScoreChanged { score: self.score });
        }

        self.check_and_replace_preview_duplicates();

        if self.check_game_over() {
            self.end_game();
        } else {
            self.spawn_next();
        }
    }

    /// Makes the head of the queue the falling card and refills the queue.
    fn spawn_next(&mut self) {
        let head = self.preview[0];
        self.preview.rotate_left(1);
        self.preview[PREVIEW_LEN - 1] = None;

        let Some(card) = head else {
            self.end_game();
            return;
        };

        let x = self.spawn_column();
        self.board.spawn(card, x, 0);
        debug!("Spawned {card} at column {x}");

        let mut excluding = self.board.all_cards().into_iter().collect::<AHashSet<_>>();
        excluding.extend(self.preview.iter().flatten().copied());
        self.preview[PREVIEW_LEN - 1] = self.deck.draw_unique(&excluding, &mut self.rng);

        if self.check_game_over() {
            self.end_game();
        }
    }

    /// Replaces queue cards that are already on the board.
    ///
    /// Rejected draws go back to the bottom of the deck, a duplicate stays in
    /// the queue if no replacement is found within [MAX_REPLACE_DRAWS] draws.
    fn check_and_replace_preview_duplicates(&mut self) {
        let on_board = self.board.all_cards().into_iter().collect::<AHashSet<_>>();

        for idx in 0..PREVIEW_LEN {
            let Some(card) = self.preview[idx] else {
                continue;
            };

            if !on_board.contains(&card) {
                continue;
            }

            let mut replacement = None;
            for _ in 0..MAX_REPLACE_DRAWS {
                let Some(drawn) = self.deck.draw() else {
                    break;
                };

                let in_preview = self
                    .preview
                    .iter()
                    .enumerate()
                    .any(|(i, c)| i != idx && *c == Some(drawn));

                if on_board.contains(&drawn) || in_preview {
                    self.deck.put_back(drawn);
                } else {
                    replacement = Some(drawn);
                    break;
                }
            }

            match replacement {
                Some(new_card) => {
                    debug!("Replaced preview duplicate {card} with {new_card}");
                    self.preview[idx] = Some(new_card);
                }
                None => warn!("No replacement found for preview duplicate {card}"),
            }
        }
    }

    fn check_game_over(&self) -> bool {
        let queue_gap = self.preview.iter().any(Option::is_none);
        let spawn_blocked = !self.board.is_valid_move(self.spawn_column(), 0);
        queue_gap || spawn_blocked || self.board.is_game_over()
    }

    fn end_game(&mut self) {
        if self.state == EngineState::GameOver {
            return;
        }

        self.state = EngineState::GameOver;
        info!("Game over with score {}", self.score);
        self.events.push(Event::GameOver { score: self.score });
    }

    fn spawn_column(&self) -> i32 {
        (self.board.width() / 2) as i32
    }

    /// The engine configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The game board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling card.
    pub fn active(&self) -> Option<ActiveCard> {
        self.board.active()
    }

    /// The look-ahead queue, the first card falls next.
    pub fn preview(&self) -> &[Option<Card>; PREVIEW_LEN] {
        &self.preview
    }

    /// The total score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The current time between falls.
    pub fn fall_interval_ms(&self) -> u64 {
        self.fall_interval_ms
    }

    /// The number of cards left in the deck.
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// The engine state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Checks if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.state == EngineState::GameOver
    }

    /// Removes and returns the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Returns a copy of the game state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.board.width(),
            height: self.board.height(),
            cells: self.board.cells().to_vec(),
            active: self.board.active(),
            preview: self.preview,
            score: self.score,
            fall_interval_ms: self.fall_interval_ms,
            game_over: self.is_game_over(),
        }
    }
}
