// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Five cards row classification.
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

use cardfall_cards::Card;

/// The number of cells in a scoring row.
pub const ROW_LEN: usize = 5;

/// A scoring poker hand, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// Two cards of the same rank.
    OnePair,
    /// Two pairs of different ranks.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// A straight with all cards of the same suit.
    StraightFlush,
    /// A ten to ace straight flush.
    RoyalFlush,
}

impl HandRank {
    /// All the hand ranks, weakest first.
    pub const ALL: [HandRank; 9] = [
        HandRank::OnePair,
        HandRank::TwoPair,
        HandRank::ThreeOfAKind,
        HandRank::Straight,
        HandRank::Flush,
        HandRank::FullHouse,
        HandRank::FourOfAKind,
        HandRank::StraightFlush,
        HandRank::RoyalFlush,
    ];

    /// The points scored by a row with this hand.
    pub fn score(&self) -> u32 {
        match self {
            HandRank::RoyalFlush => 10_000,
            HandRank::StraightFlush => 8_000,
            HandRank::FourOfAKind => 6_000,
            HandRank::FullHouse => 4_000,
            HandRank::Flush => 3_000,
            HandRank::Straight => 2_500,
            HandRank::ThreeOfAKind => 2_000,
            HandRank::TwoPair => 1_500,
            HandRank::OnePair => 1_000,
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        };

        write!(f, "{name}")
    }
}

/// The value of a row, a row without a hand scores zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowValue {
    rank: Option<HandRank>,
}

impl RowValue {
    /// A row without a scoring hand.
    pub const NONE: RowValue = RowValue { rank: None };

    /// The row hand if any.
    pub fn rank(&self) -> Option<HandRank> {
        self.rank
    }

    /// The row score.
    pub fn score(&self) -> u32 {
        self.rank.map(|r| r.score()).unwrap_or(0)
    }
}

/// Evaluates a board row.
///
/// Rows with an empty cell or with a length other than [ROW_LEN] are not
/// eligible and return [RowValue::NONE]. The result doesn't depend on the
/// order of the cards.
pub fn evaluate_row(cells: &[Option<Card>]) -> RowValue {
    if cells.len() != ROW_LEN {
        return RowValue::NONE;
    }

    let Some(cards) = cells.iter().copied().collect::<Option<Vec<_>>>() else {
        return RowValue::NONE;
    };

    let rank = classify(&cards);
    trace!("Row {cards:?} evaluated as {rank:?}");

    RowValue { rank }
}

fn classify(cards: &[Card]) -> Option<HandRank> {
    let mut values = cards.iter().map(|c| c.rank().value()).collect::<Vec<_>>();
    values.sort_unstable();

    let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let is_wheel = values == [2, 3, 4, 5, 14];
    let is_straight = is_wheel || values.windows(2).all(|w| w[1] == w[0] + 1);

    // Occurrences of each rank sorted by decreasing count.
    let mut counts = [0u8; 15];
    for &v in &values {
        counts[v as usize] += 1;
    }

    let mut groups = counts.into_iter().filter(|&c| c > 0).collect::<Vec<_>>();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let pairs = groups.iter().filter(|&&c| c == 2).count();

    if is_flush && is_straight {
        if !is_wheel && values[values.len() - 1] == 14 {
            Some(HandRank::RoyalFlush)
        } else {
            Some(HandRank::StraightFlush)
        }
    } else if groups[0] >= 4 {
        Some(HandRank::FourOfAKind)
    } else if groups == [3, 2] {
        Some(HandRank::FullHouse)
    } else if is_flush {
        Some(HandRank::Flush)
    } else if is_straight {
        Some(HandRank::Straight)
    } else if groups[0] == 3 {
        Some(HandRank::ThreeOfAKind)
    } else if pairs == 2 {
        Some(HandRank::TwoPair)
    } else if pairs == 1 {
        Some(HandRank::OnePair)
    } else {
        None
    }
}
