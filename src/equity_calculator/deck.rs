use rand::seq::SliceRandom;
use rand::Rng;

use crate::card::{Card, DECK};

/// Cards dealt to each player
pub(crate) const HOLE_CARD_COUNT: usize = 2;
/// Community cards dealt by the river
pub(crate) const BOARD_CARD_COUNT: usize = 5;
/// Smallest board a player can legally observe mid-hand
const FLOP_SIZE: usize = 3;

/// Deals random completions of a partially known table
///
/// Holds the residual pool (the reference deck minus every known card) for
/// one equity query. `deal` permutes a caller-owned copy of the pool, so
/// concurrent workers never share mutable state.
#[derive(Debug, Clone)]
pub(crate) struct Dealer {
    board: Vec<Card>,
    pool: Vec<Card>,
    known_mask: u64,
}

impl Dealer {
    /// Builds the residual pool for a hero hand and known board
    ///
    /// Boards smaller than a flop are not an observable state in holdem
    /// and are treated as fully unknown.
    pub fn new(hero: [Card; 2], known_board: &[Card]) -> Dealer {
        let board: Vec<Card> = if known_board.len() < FLOP_SIZE {
            Vec::new()
        } else {
            known_board.to_vec()
        };
        let mut known_mask = (1u64 << hero[0].index()) | (1u64 << hero[1].index());
        for card in &board {
            known_mask |= 1u64 << card.index();
        }
        let pool = DECK
            .iter()
            .copied()
            .filter(|card| known_mask & (1u64 << card.index()) == 0)
            .collect();
        Dealer {
            board,
            pool,
            known_mask,
        }
    }

    /// The known board after normalization
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The residual pool for this query
    pub fn pool(&self) -> &[Card] {
        &self.pool
    }

    /// Number of cards drawn from the pool per trial
    pub fn draw_count(&self, num_players: usize) -> usize {
        HOLE_CARD_COUNT * (num_players - 1) + (BOARD_CARD_COUNT - self.board.len())
    }

    /// Deals one trial from `scratch`, a caller-owned copy of the pool
    ///
    /// Shuffles the needed prefix uniformly at random and splits it by
    /// index: opponent hole cards first, then the board completion.
    /// Every dealt card is checked against the known-card mask; a
    /// collision is a corrupt pool and panics.
    pub fn deal<'a, R: Rng>(
        &self,
        scratch: &'a mut [Card],
        rng: &mut R,
        num_players: usize,
    ) -> (&'a [Card], &'a [Card]) {
        let count = self.draw_count(num_players);
        let (drawn, _) = scratch.partial_shuffle(rng, count);

        // one physical deck per trial
        let mut used_mask = self.known_mask;
        for card in drawn.iter() {
            let card_bit = 1u64 << card.index();
            assert_eq!(used_mask & card_bit, 0, "duplicate card dealt: {}", card);
            used_mask |= card_bit;
        }

        drawn.split_at(HOLE_CARD_COUNT * (num_players - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn cards(codes: &[&str]) -> Vec<Card> {
        codes.iter().map(|code| code.parse().unwrap()).collect()
    }

    fn hero() -> [Card; 2] {
        ["AS".parse().unwrap(), "KS".parse().unwrap()]
    }

    #[test]
    fn test_pool_excludes_known_cards() {
        let board = cards(&["2H", "7D", "QC", "JS", "3C"]);
        let dealer = Dealer::new(hero(), &board);
        assert_eq!(dealer.pool().len(), 45);
        for card in dealer.pool() {
            assert!(!board.contains(card));
            assert!(!hero().contains(card));
        }
    }

    #[test]
    fn test_preflop_pool() {
        let dealer = Dealer::new(hero(), &[]);
        assert_eq!(dealer.board().len(), 0);
        assert_eq!(dealer.pool().len(), 50);
    }

    #[test]
    fn test_sub_flop_board_treated_as_unknown() {
        let board = cards(&["2H", "7D"]);
        let dealer = Dealer::new(hero(), &board);
        assert_eq!(dealer.board().len(), 0);
        assert_eq!(dealer.pool().len(), 50);
    }

    #[test]
    fn test_draw_count() {
        let dealer = Dealer::new(hero(), &[]);
        // 5 opponents at 2 cards each plus a full board
        assert_eq!(dealer.draw_count(6), 15);
        let dealer = Dealer::new(hero(), &cards(&["2H", "7D", "QC", "JS"]));
        assert_eq!(dealer.draw_count(2), 3);
    }

    #[test]
    fn test_deal_is_collision_free() {
        let board = cards(&["2H", "7D", "QC"]);
        let dealer = Dealer::new(hero(), &board);
        let mut rng = SmallRng::seed_from_u64(7);
        let mut scratch = dealer.pool().to_vec();
        for _ in 0..100 {
            let (holes, extra) = dealer.deal(&mut scratch, &mut rng, 4);
            assert_eq!(holes.len(), 6);
            assert_eq!(extra.len(), 2);
            let mut mask = 0u64;
            for card in holes.iter().chain(extra.iter()) {
                mask |= 1u64 << card.index();
            }
            assert_eq!(mask.count_ones(), 8);
        }
    }
}
