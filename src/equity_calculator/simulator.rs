use std::str::FromStr;
use std::sync::{Arc, RwLock};

use log::debug;
use rand::rngs::SmallRng;
use rand::{thread_rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

use super::deck::{Dealer, BOARD_CARD_COUNT, HOLE_CARD_COUNT};
use crate::card::{Card, ParseCardError};
use crate::hand_evaluator::{evaluate, is_hero_winner, HandScore, TIER_COUNT};

const MIN_PLAYERS: usize = 2;
const MAX_PLAYERS: usize = 9;
/// Workers used by the fixed-signature entry points
const DEFAULT_THREADS: u8 = 4;

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("invalid card code: {0}")]
    InvalidCardCode(#[from] ParseCardError),
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
    #[error("hero must hold exactly 2 cards, got {0}")]
    InvalidHoleCards(usize),
    #[error("invalid board size {0}")]
    InvalidBoardSize(usize),
    #[error("iteration count must be at least 1")]
    InvalidIterationCount,
    #[error("too few players")]
    TooFewPlayers,
    #[error("too many players")]
    TooManyPlayers,
}

/// Aggregate outcome of a simulation
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResults {
    /// Trials the hero won outright or tied
    pub wins: u64,
    /// Trials run
    pub trials: u64,
    /// Hero wins broken down by the winning hand's category,
    /// indexed by `HandTier`
    pub wins_by_tier: [u64; TIER_COUNT],
}

impl SimulationResults {
    fn init() -> SimulationResults {
        SimulationResults {
            wins: 0,
            trials: 0,
            wins_by_tier: [0; TIER_COUNT],
        }
    }

    /// Estimated probability that the hero wins the showdown
    pub fn equity(&self) -> f64 {
        self.wins as f64 / self.trials as f64
    }

    /// Share of all trials won with each hand category; sums to `equity`
    pub fn tier_shares(&self) -> [f64; TIER_COUNT] {
        let mut shares = [0.0; TIER_COUNT];
        for (share, &wins) in shares.iter_mut().zip(self.wins_by_tier.iter()) {
            *share = wins as f64 / self.trials as f64;
        }
        shares
    }

    fn merge(&mut self, batch: &SimulationResults) {
        self.wins += batch.wins;
        self.trials += batch.trials;
        for (total, &wins) in self.wins_by_tier.iter_mut().zip(batch.wins_by_tier.iter()) {
            *total += wins;
        }
    }
}

/// Estimates hero equity against unknown opponents
///
/// Runs `iterations` independent trials split across `n_threads` workers.
/// Each trial deals every unknown card without replacement, classifies all
/// 7-card hands and credits the hero for any showdown it wins or ties.
///
/// # Arguments
///
/// * `hero` - The hero's hole cards
/// * `known_board` - 0, 3, 4 or 5 revealed community cards; 1 or 2 cards
///   are treated as no board
/// * `num_players` - Total players at the table including the hero
/// * `iterations` - Number of trials to run
/// * `n_threads` - Number of worker threads
pub fn simulate(
    hero: [Card; 2],
    known_board: &[Card],
    num_players: usize,
    iterations: u64,
    n_threads: u8,
) -> Result<SimulationResults, SimulatorError> {
    if num_players < MIN_PLAYERS {
        return Err(SimulatorError::TooFewPlayers);
    }
    if num_players > MAX_PLAYERS {
        return Err(SimulatorError::TooManyPlayers);
    }
    if iterations == 0 {
        return Err(SimulatorError::InvalidIterationCount);
    }
    if known_board.len() > BOARD_CARD_COUNT {
        return Err(SimulatorError::InvalidBoardSize(known_board.len()));
    }
    let mut seen_mask = 0u64;
    for &card in hero.iter().chain(known_board.iter()) {
        let card_bit = 1u64 << card.index();
        if seen_mask & card_bit != 0 {
            return Err(SimulatorError::DuplicateCard(card));
        }
        seen_mask |= card_bit;
    }

    let n_threads = u64::from(n_threads.max(1));
    let sim = Arc::new(Simulator::new(hero, known_board, num_players));
    debug!(
        "simulating {} trials for {} players over {} threads, pool size {}",
        iterations,
        num_players,
        n_threads,
        sim.dealer.pool().len()
    );

    let mut rng = thread_rng();
    crossbeam::scope(|scope| {
        let share = iterations / n_threads;
        let remainder = iterations % n_threads;
        for i in 0..n_threads {
            let n_trials = share + if i < remainder { 1 } else { 0 };
            if n_trials == 0 {
                continue;
            }
            let sim = Arc::clone(&sim);
            let mut rng = SmallRng::from_rng(&mut rng).unwrap();
            scope.spawn(move |_| {
                sim.run_trials(&mut rng, n_trials);
            });
        }
    })
    .unwrap();

    let results = sim.results.read().unwrap().clone();
    debug!(
        "finished {} trials, equity {:.4}",
        results.trials,
        results.equity()
    );
    Ok(results)
}

/// Hero equity as wins over iterations, in [0, 1]
///
/// Convenience over [`simulate`] with the default worker count.
pub fn calc_equity(
    hero: [Card; 2],
    known_board: &[Card],
    num_players: usize,
    iterations: u64,
) -> Result<f64, SimulatorError> {
    simulate(hero, known_board, num_players, iterations, DEFAULT_THREADS)
        .map(|results| results.equity())
}

/// The card-code boundary: parses and validates, then simulates
///
/// Card codes are 2 uppercase characters, a rank from `23456789TJQKA`
/// followed by a suit from `CDHS`. All validation happens before any
/// simulation work starts.
///
/// # Example
/// ```
/// use holdem_equity::equity_calculator::equity;
/// let eq = equity(&["AS", "KS"], &[], 2, 1000).unwrap();
/// assert!(eq > 0.0 && eq < 1.0);
/// ```
pub fn equity(
    hero_cards: &[&str],
    table_cards: &[&str],
    num_players: usize,
    iterations: u64,
) -> Result<f64, SimulatorError> {
    if hero_cards.len() != HOLE_CARD_COUNT {
        return Err(SimulatorError::InvalidHoleCards(hero_cards.len()));
    }
    let hero = [Card::from_str(hero_cards[0])?, Card::from_str(hero_cards[1])?];
    let board = table_cards
        .iter()
        .map(|code| Card::from_str(code))
        .collect::<Result<Vec<Card>, ParseCardError>>()?;
    calc_equity(hero, &board, num_players, iterations)
}

/// Shared read-only state for one equity query
struct Simulator {
    dealer: Dealer,
    hero: [Card; 2],
    num_players: usize,
    results: RwLock<SimulationResults>,
}

impl Simulator {
    fn new(hero: [Card; 2], known_board: &[Card], num_players: usize) -> Simulator {
        Simulator {
            dealer: Dealer::new(hero, known_board),
            hero,
            num_players,
            results: RwLock::new(SimulationResults::init()),
        }
    }

    /// Runs a worker's share of the trials and merges its batch once
    fn run_trials(&self, rng: &mut SmallRng, n_trials: u64) {
        let mut batch = SimulationResults::init();
        let mut scratch = self.dealer.pool().to_vec();
        let known = self.dealer.board();
        // placeholders, the tail is rewritten every trial
        let mut board = [self.hero[0]; BOARD_CARD_COUNT];
        board[..known.len()].copy_from_slice(known);
        let known_len = known.len();
        let mut scores: Vec<HandScore> = Vec::with_capacity(self.num_players);

        for _ in 0..n_trials {
            let (holes, extra) = self.dealer.deal(&mut scratch, rng, self.num_players);
            board[known_len..].copy_from_slice(extra);

            scores.clear();
            scores.push(evaluate(&combine(self.hero, &board)));
            for hole in holes.chunks_exact(HOLE_CARD_COUNT) {
                scores.push(evaluate(&combine([hole[0], hole[1]], &board)));
            }

            if is_hero_winner(&scores) {
                batch.wins += 1;
                batch.wins_by_tier[scores[0].tier() as usize] += 1;
            }
            batch.trials += 1;
        }

        self.results.write().unwrap().merge(&batch);
    }
}

fn combine(hole: [Card; 2], board: &[Card; BOARD_CARD_COUNT]) -> [Card; 7] {
    [
        hole[0], hole[1], board[0], board[1], board[2], board[3], board[4],
    ]
}
