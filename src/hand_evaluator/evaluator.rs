use crate::card::Card;
use crate::constants::{RANK_COUNT, SUIT_COUNT};

use super::score::{HandScore, HandTier};

/// Classifies 7 distinct cards into a totally ordered [`HandScore`].
///
/// The result only depends on the set of cards, never on their order.
/// Supplying fewer than 7 distinct cards is a caller error.
pub fn evaluate(cards: &[Card; 7]) -> HandScore {
    debug_assert_eq!(card_mask(cards).count_ones(), 7, "duplicate card in hand");

    // group ranks by occurrence count, strongest group first
    let mut rank_counts = [0u8; RANK_COUNT as usize];
    for card in cards.iter() {
        rank_counts[usize::from(card.rank())] += 1;
    }
    let mut groups = [(0u8, 0i8); 7];
    let mut n_groups = 0;
    for rank in (0..RANK_COUNT as i8).rev() {
        let count = rank_counts[rank as usize];
        if count > 0 {
            groups[n_groups] = (count, rank);
            n_groups += 1;
        }
    }
    let groups = &mut groups[..n_groups];
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let top = (groups[0].0, groups[1].0);

    // two trips count as a full house
    if top == (3, 2) || top == (3, 3) {
        return HandScore::new(HandTier::FullHouse, &[groups[0].1, groups[1].1]);
    }
    if groups[0].0 == 4 {
        // highest remaining rank plays as the kicker
        let kicker = groups[1..].iter().map(|g| g.1).max().unwrap();
        return HandScore::new(HandTier::FourOfAKind, &[groups[0].1, kicker]);
    }
    // three pairs collapse to the best two, the leftover pair competes
    // with the lone single for the kicker
    if n_groups == 4 && top == (2, 2) && groups[2].0 == 2 {
        let kicker = groups[2].1.max(groups[3].1);
        return HandScore::new(
            HandTier::TwoPair,
            &[groups[0].1, groups[1].1, kicker],
        );
    }

    // five or more distinct ranks admit the straight/flush family
    if n_groups >= 5 {
        let mut distinct = [0i8; 8];
        let mut n_distinct = 0;
        for rank in (0..RANK_COUNT as i8).rev() {
            if rank_counts[rank as usize] > 0 {
                distinct[n_distinct] = rank;
                n_distinct += 1;
            }
        }
        // the ace doubles as the low end of the wheel
        if rank_counts[usize::from(RANK_COUNT - 1)] > 0 {
            distinct[n_distinct] = -1;
            n_distinct += 1;
        }
        if let Some(score) = straight_or_flush(cards, &distinct[..n_distinct]) {
            return score;
        }
    }

    // the count signal stands when no straight or flush materialized
    match top {
        (3, 1) => HandScore::new(
            HandTier::ThreeOfAKind,
            &[groups[0].1, groups[1].1, groups[2].1],
        ),
        (2, 2) => HandScore::new(
            HandTier::TwoPair,
            &[groups[0].1, groups[1].1, groups[2].1],
        ),
        (2, 1) => HandScore::new(
            HandTier::Pair,
            &[groups[0].1, groups[1].1, groups[2].1, groups[3].1],
        ),
        (1, 1) => HandScore::new(
            HandTier::HighCard,
            &[
                groups[0].1,
                groups[1].1,
                groups[2].1,
                groups[3].1,
                groups[4].1,
            ],
        ),
        _ => unreachable!("unclassifiable 7-card hand"),
    }
}

/// Straight, flush and straight flush detection over a hand with five or
/// more distinct ranks. `distinct` holds the duplicate-free ranks in
/// descending order, with -1 appended when an ace is present.
fn straight_or_flush(cards: &[Card; 7], distinct: &[i8]) -> Option<HandScore> {
    let mut suit_counts = [0u8; SUIT_COUNT as usize];
    for card in cards.iter() {
        suit_counts[usize::from(card.suit())] += 1;
    }

    if let Some(flush_suit) = suit_counts.iter().position(|&count| count >= 5) {
        // ranks within the flush suit, descending, wheel ace admitted
        let mut suited = [0i8; 8];
        let mut n_suited = 0;
        for card in cards.iter() {
            if usize::from(card.suit()) == flush_suit {
                suited[n_suited] = card.rank() as i8;
                n_suited += 1;
            }
        }
        suited[..n_suited].sort_unstable_by(|a, b| b.cmp(a));
        if suited[0] == (RANK_COUNT - 1) as i8 {
            suited[n_suited] = -1;
            n_suited += 1;
        }
        let suited = &suited[..n_suited];
        if let Some(run) = straight_ranks(suited) {
            return Some(HandScore::new(HandTier::StraightFlush, &run));
        }
        return Some(HandScore::new(HandTier::Flush, &suited[..5]));
    }

    straight_ranks(distinct).map(|run| HandScore::new(HandTier::Straight, &run))
}

/// Highest 5-card run among strictly descending distinct ranks
fn straight_ranks(ranks: &[i8]) -> Option<[i8; 5]> {
    if ranks.len() < 5 {
        return None;
    }
    for i in 0..=ranks.len() - 5 {
        if ranks[i] - ranks[i + 4] == 4 {
            let mut run = [0i8; 5];
            run.copy_from_slice(&ranks[i..i + 5]);
            return Some(run);
        }
    }
    None
}

fn card_mask(cards: &[Card; 7]) -> u64 {
    cards.iter().fold(0u64, |mask, c| mask | 1u64 << c.index())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(codes: [&str; 7]) -> [Card; 7] {
        codes.map(|code| code.parse().unwrap())
    }

    #[test]
    fn test_order_independence() {
        let base = hand(["8S", "TS", "8H", "KS", "9S", "TH", "KH"]);
        let expected = evaluate(&base);
        let mut rotated = base;
        for _ in 0..7 {
            rotated.rotate_left(1);
            assert_eq!(evaluate(&rotated), expected);
        }
        let mut reversed = base;
        reversed.reverse();
        assert_eq!(evaluate(&reversed), expected);
    }

    #[test]
    fn test_high_card() {
        let score = evaluate(&hand(["AC", "KD", "9H", "7S", "5C", "3D", "2H"]));
        assert_eq!(score.tier(), HandTier::HighCard);
        assert_eq!(score.tiebreaks(), &[12, 11, 7, 5, 3]);
    }

    #[test]
    fn test_pair() {
        let score = evaluate(&hand(["9C", "9D", "AC", "KH", "7S", "4D", "2H"]));
        assert_eq!(score.tier(), HandTier::Pair);
        assert_eq!(score.tiebreaks(), &[7, 12, 11, 5]);
    }

    #[test]
    fn test_two_pair() {
        let score = evaluate(&hand(["9C", "9D", "4C", "4H", "AS", "KD", "2H"]));
        assert_eq!(score.tier(), HandTier::TwoPair);
        assert_eq!(score.tiebreaks(), &[7, 2, 12]);
    }

    #[test]
    fn test_three_pairs_collapse() {
        // pairs of 8, 4 and 3 with a lone queen: the queen out-kicks the
        // third pair
        let score = evaluate(&hand(["3H", "3S", "4H", "4S", "8S", "8C", "QH"]));
        assert_eq!(score.tier(), HandTier::TwoPair);
        assert_eq!(score.tiebreaks(), &[6, 2, 10]);

        // pairs of 8, 6 and 4 with a lone deuce: the third pair out-kicks it
        let score = evaluate(&hand(["8C", "8D", "6C", "6D", "4C", "4D", "2S"]));
        assert_eq!(score.tier(), HandTier::TwoPair);
        assert_eq!(score.tiebreaks(), &[6, 4, 2]);
    }

    #[test]
    fn test_three_of_a_kind() {
        let score = evaluate(&hand(["7C", "7D", "7H", "KS", "9C", "4D", "2H"]));
        assert_eq!(score.tier(), HandTier::ThreeOfAKind);
        assert_eq!(score.tiebreaks(), &[5, 11, 7]);
    }

    #[test]
    fn test_straight_beats_pair() {
        let score = evaluate(&hand(["9H", "9S", "5C", "6D", "7H", "8C", "KD"]));
        assert_eq!(score.tier(), HandTier::Straight);
        assert_eq!(score.tiebreaks(), &[7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_straight_takes_highest_run() {
        // six card run 4 through 9 ranks as the 9 high straight
        let score = evaluate(&hand(["4C", "5D", "6H", "7S", "8C", "9D", "KH"]));
        assert_eq!(score.tier(), HandTier::Straight);
        assert_eq!(score.tiebreaks(), &[7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_wheel_straight() {
        let score = evaluate(&hand(["AH", "2C", "3D", "4S", "5H", "9C", "JD"]));
        assert_eq!(score.tier(), HandTier::Straight);
        assert_eq!(score.tiebreaks(), &[3, 2, 1, 0, -1]);
    }

    #[test]
    fn test_flush() {
        let score = evaluate(&hand(["2H", "5H", "7H", "9H", "JH", "KH", "3S"]));
        assert_eq!(score.tier(), HandTier::Flush);
        assert_eq!(score.tiebreaks(), &[11, 9, 7, 5, 3]);
    }

    #[test]
    fn test_flush_beats_straight() {
        // 3 to 7 straight on the board, but five hearts play as a flush
        let score = evaluate(&hand(["3S", "4C", "5H", "6H", "7H", "TH", "JH"]));
        assert_eq!(score.tier(), HandTier::Flush);
        assert_eq!(score.tiebreaks(), &[9, 8, 5, 4, 3]);
    }

    #[test]
    fn test_full_house() {
        let score = evaluate(&hand(["5C", "5D", "5H", "9C", "9D", "2C", "2D"]));
        assert_eq!(score.tier(), HandTier::FullHouse);
        assert_eq!(score.tiebreaks(), &[3, 7]);
    }

    #[test]
    fn test_two_trips_make_full_house() {
        let score = evaluate(&hand(["3C", "3D", "3H", "7C", "7D", "7H", "AS"]));
        assert_eq!(score.tier(), HandTier::FullHouse);
        assert_eq!(score.tiebreaks(), &[5, 1]);
    }

    #[test]
    fn test_four_of_a_kind() {
        let score = evaluate(&hand(["2C", "2D", "2H", "2S", "AC", "KH", "QD"]));
        assert_eq!(score.tier(), HandTier::FourOfAKind);
        assert_eq!(score.tiebreaks(), &[0, 12]);
    }

    #[test]
    fn test_quads_beat_full_house() {
        let quads = evaluate(&hand(["2C", "2D", "2H", "2S", "AC", "KH", "QD"]));
        let full_house = evaluate(&hand(["AC", "AD", "AH", "KC", "KD", "2H", "3S"]));
        assert!(quads > full_house);
    }

    #[test]
    fn test_full_house_beats_flush() {
        let full_house = evaluate(&hand(["2C", "2D", "2H", "3C", "3D", "9H", "KS"]));
        let flush = evaluate(&hand(["AH", "KH", "QH", "JH", "9H", "2C", "3D"]));
        assert!(full_house > flush);
    }

    #[test]
    fn test_royal_flush() {
        let score = evaluate(&hand(["AS", "KS", "QS", "JS", "TS", "2H", "3D"]));
        assert_eq!(score.tier(), HandTier::StraightFlush);
        assert_eq!(score.tiebreaks(), &[12, 11, 10, 9, 8]);
    }

    #[test]
    fn test_wheel_straight_flush() {
        let score = evaluate(&hand(["AH", "2H", "3H", "4H", "5H", "9C", "JD"]));
        assert_eq!(score.tier(), HandTier::StraightFlush);
        assert_eq!(score.tiebreaks(), &[3, 2, 1, 0, -1]);
    }

    #[test]
    fn test_straight_flush_beats_quads() {
        let straight_flush = evaluate(&hand(["AH", "2H", "3H", "4H", "5H", "9C", "JD"]));
        let quads = evaluate(&hand(["AC", "AD", "AH", "AS", "KC", "QH", "JD"]));
        assert!(straight_flush > quads);
    }

    #[test]
    fn test_tiebreak_lengths() {
        for (codes, len) in &[
            (["AC", "KD", "9H", "7S", "5C", "3D", "2H"], 5usize),
            (["9C", "9D", "AC", "KH", "7S", "4D", "2H"], 4),
            (["9C", "9D", "4C", "4H", "AS", "KD", "2H"], 3),
            (["7C", "7D", "7H", "KS", "9C", "4D", "2H"], 3),
            (["9H", "9S", "5C", "6D", "7H", "8C", "KD"], 5),
            (["2H", "5H", "7H", "9H", "JH", "KH", "3S"], 5),
            (["5C", "5D", "5H", "9C", "9D", "2C", "2D"], 2),
            (["2C", "2D", "2H", "2S", "AC", "KH", "QD"], 2),
            (["AS", "KS", "QS", "JS", "TS", "2H", "3D"], 5),
        ] {
            let score = evaluate(&hand(*codes));
            assert_eq!(score.tiebreaks().len(), *len, "hand {:?}", codes);
            assert_eq!(score.tiebreaks().len(), score.tier().tiebreak_len());
        }
    }
}
