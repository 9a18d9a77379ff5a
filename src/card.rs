/*
 * Card value type and card code parsing
 *
 * Cards are stored as a single u8 where the value is 4 * rank + suit
 */

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::*;

/// Error parsing a 2-character card code
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("card code must be exactly 2 characters, got {0:?}")]
    InvalidLength(String),
    #[error("invalid rank character {0:?}, expected one of 23456789TJQKA")]
    InvalidRank(char),
    #[error("invalid suit character {0:?}, expected one of CDHS")]
    InvalidSuit(char),
}

/// A single playing card
///
/// Stored as `4 * rank + suit`, where rank 0-12 maps to 2 through Ace
/// and suit 0-3 maps to clubs, diamonds, hearts, spades
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(u8);

lazy_static! {
    /// The 52 card reference deck, ordered by card index
    pub static ref DECK: [Card; 52] = init_deck();
}

impl Card {
    /// Create a card from rank (0 -> 12) and suit (0 -> 3) indexes
    pub fn new(rank: u8, suit: u8) -> Card {
        debug_assert!(rank < RANK_COUNT && suit < SUIT_COUNT);
        Card(4 * rank + suit)
    }

    /// Rank index, 0 (deuce) to 12 (ace)
    pub const fn rank(self) -> u8 {
        self.0 >> 2
    }

    /// Suit index, 0 (clubs) to 3 (spades)
    pub const fn suit(self) -> u8 {
        self.0 & 3
    }

    /// Index into the 52 card deck
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Card {
    /// Writes the card as its 2-character code, e.g. `AS`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            RANK_TO_CHAR[usize::from(self.rank())],
            SUIT_TO_CHAR[usize::from(self.suit())]
        )
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses a 2-character card code: an uppercase rank character from
    /// `23456789TJQKA` followed by an uppercase suit character from `CDHS`
    fn from_str(s: &str) -> Result<Card, ParseCardError> {
        let mut chars = s.chars();
        let (rank_char, suit_char) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(c), None) => (r, c),
            _ => return Err(ParseCardError::InvalidLength(s.to_string())),
        };
        let rank = char_to_rank(rank_char);
        if rank == u8::MAX {
            return Err(ParseCardError::InvalidRank(rank_char));
        }
        let suit = char_to_suit(suit_char);
        if suit == u8::MAX {
            return Err(ParseCardError::InvalidSuit(suit_char));
        }
        Ok(Card::new(rank, suit))
    }
}

/// Convert uppercase rank char to u8, `u8::MAX` when invalid
pub fn char_to_rank(c: char) -> u8 {
    match c {
        'A' => 12,
        'K' => 11,
        'Q' => 10,
        'J' => 9,
        'T' => 8,
        '9' => 7,
        '8' => 6,
        '7' => 5,
        '6' => 4,
        '5' => 3,
        '4' => 2,
        '3' => 1,
        '2' => 0,
        _ => u8::MAX,
    }
}

/// Convert uppercase suit char to u8, `u8::MAX` when invalid
pub fn char_to_suit(c: char) -> u8 {
    match c {
        'C' => 0,
        'D' => 1,
        'H' => 2,
        'S' => 3,
        _ => u8::MAX,
    }
}

fn init_deck() -> [Card; 52] {
    let mut deck = [Card(0); 52];
    for c in 0..CARD_COUNT {
        deck[usize::from(c)] = Card(c);
    }
    deck
}
