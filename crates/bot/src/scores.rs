// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game results and the leaderboard.
use ahash::AHashMap;
use std::fmt;

use cardfall_engine::{Event, HandRank};

/// The result of a game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSummary {
    /// The final score.
    pub score: u32,
    /// The number of steps played.
    pub ticks: u64,
    /// The number of cards that landed.
    pub cards_placed: usize,
    /// The number of scored rows.
    pub rows_cleared: usize,
    /// The number of passes that cleared more than one row.
    pub combos: usize,
    /// Scored rows by hand.
    pub hands: AHashMap<HandRank, usize>,
    /// The game ended, false if it was stopped.
    pub finished: bool,
}

impl GameSummary {
    /// Updates the counters with an engine event.
    pub fn record(&mut self, event: &Event) {
        match event {
            Event::CardPlaced(_) => self.cards_placed += 1,
            Event::RowsCleared { rows, combo, .. } => {
                self.rows_cleared += rows.len();
                if *combo {
                    self.combos += 1;
                }

                for row in rows {
                    *self.hands.entry(row.rank).or_default() += 1;
                }
            }
            Event::ScoreChanged { score } | Event::GameOver { score } => self.score = *score,
        }
    }
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score {} cards {} rows {} combos {} ticks {}",
            self.score, self.cards_placed, self.rows_cleared, self.combos, self.ticks
        )?;

        if !self.finished {
            write!(f, " (stopped)")?;
        }

        let mut hands = self.hands.iter().collect::<Vec<_>>();
        hands.sort_by(|a, b| b.0.cmp(a.0));
        for (rank, count) in hands {
            write!(f, ", {rank}: {count}")?;
        }

        Ok(())
    }
}

/// A leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    /// The player name.
    pub player: String,
    /// The game score.
    pub score: u32,
}

/// The best scores, highest first.
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    entries: Vec<HighScore>,
}

impl HighScores {
    /// The maximum number of entries.
    pub const MAX_ENTRIES: usize = 20;

    /// Checks if a score would enter the leaderboard.
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < Self::MAX_ENTRIES
            || self.entries.last().is_some_and(|e| score > e.score)
    }

    /// Adds a score, returns its position or `None` if it didn't qualify.
    ///
    /// A score goes after the existing entries with the same score.
    pub fn insert(&mut self, player: impl Into<String>, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let pos = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(
            pos,
            HighScore {
                player: player.into(),
                score,
            },
        );
        self.entries.truncate(Self::MAX_ENTRIES);

        Some(pos)
    }

    /// The entries from the highest score.
    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for HighScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, entry) in self.entries.iter().enumerate() {
            writeln!(f, "{:>3}. {:<12} {:>8}", idx + 1, entry.player, entry.score)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardfall_engine::{ActiveCard, ClearedRow};

    #[test]
    fn insert_keeps_order() {
        let mut scores = HighScores::default();
        assert!(scores.is_empty());

        assert_eq!(scores.insert("a", 1_000), Some(0));
        assert_eq!(scores.insert("b", 3_000), Some(0));
        assert_eq!(scores.insert("c", 2_000), Some(1));
        assert_eq!(scores.insert("d", 2_000), Some(2));

        let players = scores
            .entries()
            .iter()
            .map(|e| e.player.as_str())
            .collect::<Vec<_>>();
        assert_eq!(players, vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn keeps_top_scores() {
        let mut scores = HighScores::default();
        for n in 0..HighScores::MAX_ENTRIES as u32 {
            assert!(scores.insert(format!("p{n}"), (n + 1) * 100).is_some());
        }
        assert_eq!(scores.len(), HighScores::MAX_ENTRIES);

        // Full table, the lowest is 100.
        assert!(!scores.qualifies(100));
        assert_eq!(scores.insert("low", 50), None);
        assert_eq!(scores.insert("tie", 100), None);

        assert_eq!(scores.insert("top", 10_000), Some(0));
        assert_eq!(scores.len(), HighScores::MAX_ENTRIES);
        assert_eq!(scores.entries()[0].player, "top");
        assert_eq!(scores.entries().last().map(|e| e.score), Some(200));
    }

    #[test]
    fn summary_records_events() {
        let mut summary = GameSummary::default();
        let card = "AS".parse().unwrap();

        summary.record(&Event::CardPlaced(ActiveCard { card, x: 2, y: 9 }));
        summary.record(&Event::RowsCleared {
            rows: vec![
                ClearedRow {
                    row: 9,
                    rank: HandRank::OnePair,
                    score: 1_000,
                },
                ClearedRow {
                    row: 8,
                    rank: HandRank::Flush,
                    score: 3_000,
                },
            ],
            combo: true,
            score_delta: 8_000,
        });
        summary.record(&Event::ScoreChanged { score: 8_000 });

        assert_eq!(summary.cards_placed, 1);
        assert_eq!(summary.rows_cleared, 2);
        assert_eq!(summary.combos, 1);
        assert_eq!(summary.score, 8_000);
        assert_eq!(summary.hands.get(&HandRank::Flush), Some(&1));
        assert_eq!(
            summary.to_string(),
            "score 8000 cards 1 rows 2 combos 1 ticks 0 (stopped), Flush: 1, One Pair: 1"
        );
    }
}
