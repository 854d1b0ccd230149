// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The game board.
//!
//! The board is a grid of cells where each cell is empty or holds a card,
//! cells are stored row-major in a flat vector. Coordinates are `(x, y)` with
//! `x` the column from the left and `y` the row from the top, so cards fall
//! toward larger `y` values.
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

use cardfall_cards::Card;
use cardfall_eval::{HandRank, evaluate_row};

/// The falling card and its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCard {
    /// The falling card.
    pub card: Card,
    /// The card column.
    pub x: i32,
    /// The card row.
    pub y: i32,
}

/// A row removed by a scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearedRow {
    /// The row index before removal.
    pub row: usize,
    /// The row hand.
    pub rank: HandRank,
    /// The row score before any combo bonus.
    pub score: u32,
}

/// The result of a scoring pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearedRows {
    rows: Vec<ClearedRow>,
    combo: bool,
    score: u32,
}

impl ClearedRows {
    /// The removed rows from the bottom to the top of the board.
    pub fn rows(&self) -> &[ClearedRow] {
        &self.rows
    }

    /// Checks if more than one row was completed and the score was doubled.
    pub fn combo(&self) -> bool {
        self.combo
    }

    /// The total score for this pass.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Checks if no rows were completed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The game board.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<Card>>,
    active: Option<ActiveCard>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// The width must be positive, use [Config::validate](crate::Config::validate)
    /// to check user supplied sizes.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
            active: None,
        }
    }

    /// The number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }

        Some(y as usize * self.width + x as usize)
    }

    /// Returns the card at `(x, y)`, `None` if the cell is empty or out of bounds.
    pub fn cell(&self, x: i32, y: i32) -> Option<Card> {
        self.index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Sets the cell at `(x, y)`, returns false if out of bounds.
    pub(crate) fn set(&mut self, x: i32, y: i32, cell: Option<Card>) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// The cells of row `y`.
    ///
    /// Panics if `y` is out of bounds.
    pub fn row(&self, y: usize) -> &[Option<Card>] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterates the rows from the top to the bottom of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Card>]> {
        self.cells.chunks(self.width)
    }

    /// The cells in row-major order.
    pub fn cells(&self) -> &[Option<Card>] {
        &self.cells
    }

    /// Checks if `(x, y)` is on the board and empty.
    pub fn is_valid_move(&self, x: i32, y: i32) -> bool {
        matches!(self.index(x, y), Some(idx) if self.cells[idx].is_none())
    }

    /// Sets the falling card at the given position.
    pub fn spawn(&mut self, card: Card, x: i32, y: i32) {
        self.active = Some(ActiveCard { card, x, y });
    }

    /// The falling card.
    pub fn active(&self) -> Option<ActiveCard> {
        self.active
    }

    /// Removes the falling card.
    pub fn take_active(&mut self) -> Option<ActiveCard> {
        self.active.take()
    }

    /// Moves the falling card by `(dx, dy)` if the target cell is valid.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let (x, y) = (active.x + dx, active.y + dy);
        if self.is_valid_move(x, y) {
            self.active = Some(ActiveCard { x, y, ..active });
            true
        } else {
            false
        }
    }

    /// Copies the falling card into the grid at its current position.
    ///
    /// The falling card is left in place, returns false and leaves the grid
    /// unchanged if there is no falling card or its cell is not valid.
    pub fn place_card(&mut self) -> bool {
        match self.active {
            Some(active) if self.is_valid_move(active.x, active.y) => {
                self.set(active.x, active.y, Some(active.card))
            }
            _ => false,
        }
    }

    /// Returns all the cards on the grid and the falling card.
    pub fn all_cards(&self) -> Vec<Card> {
        self.cells
            .iter()
            .flatten()
            .copied()
            .chain(self.active.map(|a| a.card))
            .collect()
    }

    /// Checks if any cell in the top row is occupied.
    pub fn is_game_over(&self) -> bool {
        self.height > 0 && self.row(0).iter().any(Option::is_some)
    }

    /// Checks if row `y` has no empty cells.
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().all(Option::is_some)
    }

    /// Scores and removes all full rows that make a poker hand.
    ///
    /// All completed rows are removed at once, the score is doubled when more
    /// than one row completes, and the remaining cards fall into the empty
    /// cells below them.
    pub fn check_for_completed_hands(&mut self) -> ClearedRows {
        let mut rows = Vec::new();

        for y in (0..self.height).rev() {
            if !self.is_row_full(y) {
                continue;
            }

            let value = evaluate_row(self.row(y));
            if let Some(rank) = value.rank() {
                rows.push(ClearedRow {
                    row: y,
                    rank,
                    score: value.score(),
                });
            }
        }

        if rows.is_empty() {
            return ClearedRows::default();
        }

        let combo = rows.len() > 1;
        let mut score = rows.iter().map(|r| r.score).sum::<u32>();
        if combo {
            score *= 2;
        }

        for r in &rows {
            info!("Row {} cleared with {} for {}", r.row, r.rank, r.score);
        }

        self.remove_rows(&rows);
        self.apply_gravity();

        debug!("Board after clear:\n{self}");

        ClearedRows { rows, combo, score }
    }

    /// Removes the given rows and inserts as many empty rows at the top.
    fn remove_rows(&mut self, rows: &[ClearedRow]) {
        let mut cells = vec![None; rows.len() * self.width];
        cells.reserve(self.cells.len());

        for (y, row) in self.cells.chunks(self.width).enumerate() {
            if !rows.iter().any(|r| r.row == y) {
                cells.extend_from_slice(row);
            }
        }

        self.cells = cells;
    }

    /// Drops every card in each column to the lowest empty cell below it.
    ///
    /// Cards in a column keep their top to bottom order.
    pub fn apply_gravity(&mut self) {
        let (width, height) = (self.width, self.height);

        for x in 0..width {
            let column = (0..height)
                .filter_map(|y| self.cells[y * width + x])
                .collect::<Vec<_>>();

            let top = height - column.len();
            for y in 0..height {
                self.cells[y * width + x] = y.checked_sub(top).map(|idx| column[idx]);
            }
        }
    }

    /// Creates a board from text rows listed from top to bottom, each row has
    /// one card or `..` for each column.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let parsed = rows
            .iter()
            .map(|row| {
                row.split_whitespace()
                    .map(|c| if c == ".." { None } else { Some(c.parse().unwrap()) })
                    .collect::<Vec<Option<Card>>>()
            })
            .collect::<Vec<_>>();

        let width = parsed[0].len();
        assert!(parsed.iter().all(|r| r.len() == width));

        Self {
            width,
            height: parsed.len(),
            cells: parsed.into_iter().flatten().collect(),
            active: None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let active = self
                    .active
                    .filter(|a| a.x == x as i32 && a.y == y as i32)
                    .map(|a| a.card);

                match (active, cell) {
                    (Some(card), _) => write!(f, "[{card}]")?,
                    (None, Some(card)) => write!(f, " {card} ")?,
                    (None, None) => write!(f, " .. ")?,
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use cardfall_cards::Deck;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn valid_moves() {
        let mut board = Board::new(5, 10);
        board.set(2, 9, Some(card("AS")));

        assert!(board.is_valid_move(0, 0));
        assert!(board.is_valid_move(4, 9));
        assert!(!board.is_valid_move(-1, 0));
        assert!(!board.is_valid_move(5, 0));
        assert!(!board.is_valid_move(0, -1));
        assert!(!board.is_valid_move(0, 10));
        assert!(!board.is_valid_move(2, 9));
        assert!(board.is_valid_move(2, 8));
    }

    #[test]
    fn move_active_card() {
        let mut board = Board::new(5, 3);
        assert!(!board.try_move(0, 1));

        board.spawn(card("7H"), 2, 0);
        assert!(board.try_move(-1, 0));
        assert!(board.try_move(0, 1));
        assert_eq!(board.active().map(|a| (a.x, a.y)), Some((1, 1)));

        board.set(1, 2, Some(card("2C")));
        assert!(!board.try_move(0, 1));
        assert!(!board.try_move(-2, 0));
        assert_eq!(board.active().map(|a| (a.x, a.y)), Some((1, 1)));
    }

    #[test]
    fn place_card() {
        let mut board = Board::new(5, 10);
        assert!(!board.place_card());

        board.spawn(card("QD"), 3, 9);
        assert!(board.place_card());
        assert_eq!(board.cell(3, 9), Some(card("QD")));

        // The board doesn't clear the active card.
        assert!(board.active().is_some());

        // Placing again fails as the cell is now occupied.
        assert!(!board.place_card());
        assert_eq!(board.take_active().map(|a| a.card), Some(card("QD")));
        assert!(board.active().is_none());
    }

    #[test]
    fn all_cards_include_active() {
        let mut board = Board::from_rows(&[
            ".. .. .. .. ..",
            ".. .. .. .. ..",
            "2C .. .. 9D ..",
        ]);
        board.spawn(card("KH"), 2, 0);

        let mut cards = board.all_cards();
        cards.sort_by_key(|c| c.to_string());
        assert_eq!(cards, vec![card("2C"), card("9D"), card("KH")]);
    }

    #[test]
    fn game_over_on_top_row() {
        let mut board = Board::new(5, 4);
        assert!(!board.is_game_over());

        // The falling card doesn't count.
        board.spawn(card("AS"), 2, 0);
        assert!(!board.is_game_over());

        board.set(4, 0, Some(card("AD")));
        assert!(board.is_game_over());

        // A board without rows has no top row.
        let board = Board::new(5, 0);
        assert!(!board.is_game_over());
        assert!(!board.is_valid_move(0, 0));
    }

    #[test]
    fn clear_single_row() {
        let mut board = Board::from_rows(&[
            ".. .. .. .. ..",
            ".. 3C .. .. ..",
            "4D 5D .. .. 6S",
            "TH JH QH KH AH",
        ]);

        let cleared = board.check_for_completed_hands();
        assert_eq!(cleared.score(), 10_000);
        assert!(!cleared.combo());
        assert_eq!(
            cleared.rows(),
            &[ClearedRow {
                row: 3,
                rank: HandRank::RoyalFlush,
                score: 10_000
            }]
        );

        let expected = Board::from_rows(&[
            ".. .. .. .. ..",
            ".. .. .. .. ..",
            ".. 3C .. .. ..",
            "4D 5D .. .. 6S",
        ]);
        assert_eq!(board, expected);
    }

    #[test]
    fn full_row_without_hand_stays() {
        let mut board = Board::from_rows(&[
            ".. .. .. .. ..",
            ".. .. 3C .. ..",
            "2C 5D 9H JS KC",
        ]);
        let before = board.clone();

        let cleared = board.check_for_completed_hands();
        assert!(cleared.is_empty());
        assert_eq!(cleared.score(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn combo_doubles_score() {
        let mut rows = vec![".. .. .. .. .."; 10];
        rows[2] = ".. .. 8S .. ..";
        rows[3] = "7C 7D 7S 2H 2D";
        rows[4] = "9C .. .. .. ..";
        rows[5] = "9D .. .. .. 4C";
        rows[6] = "2C 5D 9H JS KC";
        rows[7] = "AS 2S 3S 4S 5S";
        rows[8] = "JC .. 5H .. ..";
        rows[9] = "JD QD .. 3D 3H";
        let mut board = Board::from_rows(&rows);

        let cleared = board.check_for_completed_hands();
        assert!(cleared.combo());
        assert_eq!(cleared.score(), 2 * (4_000 + 8_000));

        let cleared_rows = cleared.rows().iter().map(|r| r.row).collect::<Vec<_>>();
        assert_eq!(cleared_rows, vec![7, 3]);

        // Rows 3 and 7 are removed together, then each column is compacted.
        let expected = Board::from_rows(&[
            ".. .. .. .. ..",
            ".. .. .. .. ..",
            ".. .. .. .. ..",
            ".. .. .. .. ..",
            ".. .. .. .. ..",
            "9C .. .. .. ..",
            "9D .. .. .. ..",
            "2C .. 8S .. 4C",
            "JC 5D 9H JS KC",
            "JD QD 5H 3D 3H",
        ]);
        assert_eq!(board, expected);
    }

    #[test]
    fn simultaneous_removal() {
        let mut board = Board::from_rows(&[
            ".. .. .. .. ..",
            "6C .. .. .. ..",
            "QC QD 4H 4S 9C",
            "8H 8D 3H 3S 3C",
        ]);

        let cleared = board.check_for_completed_hands();
        assert!(cleared.combo());
        assert_eq!(cleared.score(), 2 * (4_000 + 1_500));

        let expected = Board::from_rows(&[
            ".. .. .. .. ..",
            ".. .. .. .. ..",
            ".. .. .. .. ..",
            "6C .. .. .. ..",
        ]);
        assert_eq!(board, expected);
    }

    #[test]
    fn gravity_keeps_column_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut deck = Deck::new_and_shuffled(2, &mut rng);

        for _ in 0..50 {
            let mut board = Board::new(5, 10);
            for x in 0..5 {
                for y in 0..10 {
                    if rng.random_bool(0.4) {
                        if deck.is_empty() {
                            deck = Deck::new_and_shuffled(2, &mut rng);
                        }
                        board.set(x, y, deck.draw());
                    }
                }
            }

            let columns = |b: &Board| {
                (0..5)
                    .map(|x| (0..10).filter_map(|y| b.cell(x, y)).collect::<Vec<_>>())
                    .collect::<Vec<_>>()
            };

            let before = columns(&board);
            board.apply_gravity();
            assert_eq!(columns(&board), before);

            // No card has an empty cell below it.
            for x in 0..5 {
                for y in 0..9 {
                    if board.cell(x, y).is_some() {
                        assert!(board.cell(x, y + 1).is_some());
                    }
                }
            }
        }
    }

    #[test]
    fn display_marks_active_card() {
        let mut board = Board::from_rows(&[".. .. .. .. ..", "2C .. .. .. .."]);
        board.spawn(card("AS"), 2, 0);
        assert_eq!(board.to_string(), " ..  .. [AS] ..  .. \n 2C  ..  ..  ..  .. \n");
    }
}
