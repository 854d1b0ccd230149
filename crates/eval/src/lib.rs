// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardfall poker row evaluator.
//!
//! A row of five cells on the board scores as a poker hand once every cell
//! holds a card. Use [evaluate_row] to classify a row and get its score:
//!
//! ```
//! # use cardfall_eval::*;
//! let row = ["TH", "JH", "QH", "KH", "AH"]
//!     .into_iter()
//!     .map(|c| c.parse::<Card>().ok())
//!     .collect::<Vec<_>>();
//!
//! let value = evaluate_row(&row);
//! assert_eq!(value.rank(), Some(HandRank::RoyalFlush));
//! assert_eq!(value.score(), 10_000);
//!
//! // A row with an empty cell doesn't score.
//! let value = evaluate_row(&row[..4].iter().copied().chain([None]).collect::<Vec<_>>());
//! assert_eq!(value.rank(), None);
//! assert_eq!(value.score(), 0);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandRank, ROW_LEN, RowValue, evaluate_row};

// Reexport cards types.
pub use cardfall_cards::{Card, Deck, Rank, Suit};
