// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards and deck definitions.
use ahash::AHashSet;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A playing card.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card given a rank and suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank, self.suit)
    }
}

/// Error returned when parsing a card string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The string has the wrong length.
    #[error("invalid card length in {0:?}")]
    Length(String),
    /// The rank character is unknown.
    #[error("invalid rank in {0:?}")]
    Rank(String),
    /// The suit character is unknown.
    #[error("invalid suit in {0:?}")]
    Suit(String),
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses cards like `"AS"`, `"th"`, or `"10H"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let chars = s.chars().collect::<Vec<_>>();
        let (rank, suit) = match chars.as_slice() {
            ['1', '0', suit] => (Rank::Ten, *suit),
            [rank, suit] => {
                let rank = Rank::from_char(*rank).ok_or_else(|| ParseCardError::Rank(s.into()))?;
                (rank, *suit)
            }
            _ => return Err(ParseCardError::Length(s.into())),
        };

        let suit = Suit::from_char(suit).ok_or_else(|| ParseCardError::Suit(s.into()))?;
        Ok(Card::new(rank, suit))
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The face value of this rank, 2 for a deuce up to 14 for an ace.
    pub fn value(&self) -> u8 {
        *self as u8 + 2
    }

    fn from_char(c: char) -> Option<Rank> {
        let rank = match c.to_ascii_uppercase() {
            '2' => Rank::Deuce,
            '3' => Rank::Trey,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return None,
        };

        Some(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    /// The suit symbol used by card faces.
    pub fn symbol(&self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    fn from_char(c: char) -> Option<Suit> {
        let suit = match c.to_ascii_uppercase() {
            'C' | '♣' => Suit::Clubs,
            'D' | '♦' => Suit::Diamonds,
            'H' | '♥' => Suit::Hearts,
            'S' | '♠' => Suit::Spades,
            _ => return None,
        };

        Some(suit)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

/// A shoe of one or more full 52 cards sets.
///
/// Cards are dealt from the end of the deck, cards returned with
/// [Deck::put_back] go to the bottom so they are dealt last.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in a single set.
    pub const SIZE: usize = 52;

    /// Creates an ordered deck with `multiplicity` full sets.
    ///
    /// Panics if the number of cards overflows `usize`.
    pub fn new(multiplicity: usize) -> Self {
        let mut cards = Vec::with_capacity(multiplicity * Self::SIZE);
        for _ in 0..multiplicity {
            cards.extend(Suit::suits().flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s))));
        }

        Self { cards }
    }

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng + ?Sized>(multiplicity: usize, rng: &mut R) -> Self {
        let mut deck = Self::new(multiplicity);
        deck.shuffle(rng);
        deck
    }

    /// Shuffles the remaining cards.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draws the top card, returns `None` when the deck is empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draws a random card that is not in the `excluding` set.
    ///
    /// Makes as many random picks as there are cards in the deck and returns
    /// the first card that is not excluded, so it may return `None` even when
    /// a suitable card is still in the deck.
    pub fn draw_unique<R: Rng + ?Sized>(
        &mut self,
        excluding: &AHashSet<Card>,
        rng: &mut R,
    ) -> Option<Card> {
        let attempts = self.cards.len();
        for _ in 0..attempts {
            let idx = rng.random_range(0..self.cards.len());
            if !excluding.contains(&self.cards[idx]) {
                return Some(self.cards.remove(idx));
            }
        }

        None
    }

    /// Returns a card to the bottom of the deck.
    pub fn put_back(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;
    use rand::rngs::StdRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(101)
    }

    #[test]
    fn card_to_string() {
        let cases = [
            (Rank::King, Suit::Diamonds, "KD"),
            (Rank::Five, Suit::Spades, "5S"),
            (Rank::Ten, Suit::Hearts, "TH"),
            (Rank::Ace, Suit::Clubs, "AC"),
        ];

        for (rank, suit, s) in cases {
            let card = Card::new(rank, suit);
            assert_eq!(card.to_string(), s);
            assert_eq!(format!("{card:?}"), format!("Card({s})"));
        }
    }

    #[test]
    fn card_parse() {
        assert_eq!("KD".parse(), Ok(Card::new(Rank::King, Suit::Diamonds)));
        assert_eq!("th".parse(), Ok(Card::new(Rank::Ten, Suit::Hearts)));
        assert_eq!("10H".parse(), Ok(Card::new(Rank::Ten, Suit::Hearts)));
        assert_eq!("A♠".parse(), Ok(Card::new(Rank::Ace, Suit::Spades)));

        assert!(matches!("XD".parse::<Card>(), Err(ParseCardError::Rank(_))));
        assert!(matches!("KX".parse::<Card>(), Err(ParseCardError::Suit(_))));
        assert!(matches!("KDD".parse::<Card>(), Err(ParseCardError::Length(_))));
        assert!(matches!("".parse::<Card>(), Err(ParseCardError::Length(_))));
    }

    #[test]
    fn suit_symbols() {
        let symbols = Suit::suits().map(|s| s.symbol()).collect::<String>();
        assert_eq!(symbols, "♣♦♥♠");

        for suit in Suit::suits() {
            let card = format!("Q{}", suit.symbol()).parse::<Card>();
            assert_eq!(card, Ok(Card::new(Rank::Queen, suit)));
        }
    }

    #[test]
    fn rank_values() {
        assert_eq!(Rank::Deuce.value(), 2);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Ace.value(), 14);
        assert!(Rank::ranks().zip(Rank::ranks().skip(1)).all(|(a, b)| a < b));
    }

    #[test]
    fn deck_multiplicity() {
        let deck = Deck::new(3);
        assert_eq!(deck.len(), 3 * Deck::SIZE);

        let mut counts = AHashMap::<Card, usize>::default();
        for card in deck {
            *counts.entry(card).or_default() += 1;
        }

        assert_eq!(counts.len(), Deck::SIZE);
        assert!(counts.values().all(|&c| c == 3));
    }

    #[test]
    fn draw_until_empty() {
        let mut deck = Deck::new_and_shuffled(2, &mut seeded());

        let mut drawn = 0;
        while deck.draw().is_some() {
            drawn += 1;
        }

        assert_eq!(drawn, 2 * Deck::SIZE);
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn shuffle_keeps_cards() {
        let mut deck = Deck::new(1);
        deck.shuffle(&mut seeded());

        let cards = deck.into_iter().collect::<AHashSet<_>>();
        assert_eq!(cards.len(), Deck::SIZE);
    }

    #[test]
    fn draw_unique_skips_excluded() {
        let mut rng = seeded();
        let mut deck = Deck::new(1);

        // Exclude all spades, every unique draw must be another suit.
        let excluding = Rank::ranks()
            .map(|r| Card::new(r, Suit::Spades))
            .collect::<AHashSet<_>>();

        for _ in 0..10 {
            if let Some(card) = deck.draw_unique(&excluding, &mut rng) {
                assert_ne!(card.suit(), Suit::Spades);
            }
        }
    }

    #[test]
    fn draw_unique_removes_card() {
        let mut rng = seeded();
        let mut deck = Deck::new(1);

        let card = deck.draw_unique(&AHashSet::default(), &mut rng).unwrap();
        assert_eq!(deck.len(), Deck::SIZE - 1);
        assert!(deck.into_iter().all(|c| c != card));
    }

    #[test]
    fn draw_unique_all_excluded() {
        let mut rng = seeded();
        let mut deck = Deck::new(2);
        let excluding = Deck::new(1).into_iter().collect::<AHashSet<_>>();

        assert_eq!(deck.draw_unique(&excluding, &mut rng), None);
        assert_eq!(deck.len(), 2 * Deck::SIZE);

        let mut empty = Deck::new(0);
        assert_eq!(empty.draw_unique(&AHashSet::default(), &mut rng), None);
    }

    #[test]
    fn put_back_goes_to_bottom() {
        let mut deck = Deck::new(1);
        let top = deck.draw().unwrap();
        deck.put_back(top);

        assert_eq!(deck.len(), Deck::SIZE);
        assert_ne!(deck.draw(), Some(top));
        assert_eq!(deck.into_iter().next(), Some(top));
    }
}
