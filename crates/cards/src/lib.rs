// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardfall cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use cardfall_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let td: Card = "TD".parse().unwrap();
//! assert_eq!(ah.to_string(), "AH");
//! assert_eq!(td.rank(), Rank::Ten);
//! ```
//!
//! and a [Deck] type that holds one or more full 52 cards sets for shuffling
//! and drawing:
//!
//! ```
//! # use ahash::AHashSet;
//! # use cardfall_cards::{Card, Deck, Rank, Suit};
//! let mut rng = rand::rng();
//! let mut deck = Deck::new_and_shuffled(2, &mut rng);
//! assert_eq!(deck.len(), 104);
//!
//! // Draw a card that is not the ace of spades.
//! let mut excluding = AHashSet::default();
//! excluding.insert(Card::new(Rank::Ace, Suit::Spades));
//! let card = deck.draw_unique(&excluding, &mut rng);
//! assert_ne!(card, Some(Card::new(Rank::Ace, Suit::Spades)));
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, ParseCardError, Rank, Suit};
