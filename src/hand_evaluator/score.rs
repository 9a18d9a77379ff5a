use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Number of hand categories
pub const TIER_COUNT: usize = 9;

/// Poker hand categories, weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HandTier {
    HighCard = 0,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandTier {
    /// All categories, weakest first
    pub const ALL: [HandTier; TIER_COUNT] = [
        HandTier::HighCard,
        HandTier::Pair,
        HandTier::TwoPair,
        HandTier::ThreeOfAKind,
        HandTier::Straight,
        HandTier::Flush,
        HandTier::FullHouse,
        HandTier::FourOfAKind,
        HandTier::StraightFlush,
    ];

    /// Number of tie-break ranks carried by this category
    pub const fn tiebreak_len(self) -> usize {
        match self {
            HandTier::FullHouse | HandTier::FourOfAKind => 2,
            HandTier::TwoPair | HandTier::ThreeOfAKind => 3,
            HandTier::Pair => 4,
            HandTier::HighCard
            | HandTier::Straight
            | HandTier::Flush
            | HandTier::StraightFlush => 5,
        }
    }
}

impl fmt::Display for HandTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Totally ordered strength of a 7 card hand
///
/// Compares by category first, then lexicographically over the tie-break
/// ranks (first differing position decides). The tie-break length is fixed
/// per category: 2 for FullHouse/FourOfAKind, 3 for TwoPair/ThreeOfAKind,
/// 4 for Pair and 5 otherwise. Ranks are signed so the wheel's low ace (-1)
/// orders below a deuce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandScore {
    tier: HandTier,
    ranks: [i8; 5],
    len: u8,
}

impl HandScore {
    /// Builds a score; `tiebreaks` must match the category's length
    pub(crate) fn new(tier: HandTier, tiebreaks: &[i8]) -> HandScore {
        assert_eq!(tiebreaks.len(), tier.tiebreak_len());
        let mut ranks = [0i8; 5];
        ranks[..tiebreaks.len()].copy_from_slice(tiebreaks);
        HandScore {
            tier,
            ranks,
            len: tiebreaks.len() as u8,
        }
    }

    pub fn tier(&self) -> HandTier {
        self.tier
    }

    /// Tie-break ranks, most significant first
    pub fn tiebreaks(&self) -> &[i8] {
        &self.ranks[..usize::from(self.len)]
    }
}

impl Ord for HandScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tier
            .cmp(&other.tier)
            .then_with(|| self.tiebreaks().cmp(other.tiebreaks()))
    }
}

impl PartialOrd for HandScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
