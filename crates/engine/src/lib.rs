// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardfall game engine.
//!
//! Cards fall one at a time into a five columns board, a full row that makes
//! a poker hand scores and is removed. The [Engine] owns the board, the deck
//! and the look-ahead queue, it is driven by an external clock and by the
//! player commands:
//!
//! ```
//! # use cardfall_engine::*;
//! let mut engine = Engine::with_seed(Config::default(), 42).unwrap();
//! assert_eq!(engine.active().map(|a| (a.x, a.y)), Some((2, 0)));
//!
//! // Nothing happens until the fall interval has elapsed.
//! assert!(!engine.tick(500));
//! assert!(engine.tick(500));
//! assert_eq!(engine.active().map(|a| a.y), Some(1));
//!
//! engine.move_left();
//! engine.hard_drop();
//! assert!(engine.board().cell(1, 9).is_some());
//!
//! for event in engine.take_events() {
//!     println!("{event:?}");
//! }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod board;
pub use board::{ActiveCard, Board, ClearedRow, ClearedRows};

pub mod config;
pub use config::{Config, ConfigError};

pub mod engine;
pub use engine::{Engine, EngineState, MAX_REPLACE_DRAWS, PREVIEW_LEN};

pub mod event;
pub use event::Event;

pub mod snapshot;
pub use snapshot::Snapshot;

// Reexport cards and eval types.
pub use cardfall_eval::{Card, Deck, HandRank, Rank, RowValue, Suit, evaluate_row};
