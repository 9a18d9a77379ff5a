/// # Holdem Equity
/// A texas holdem equity estimation library
///
/// Currently supports
///  - monte carlo hero vs. unknown-opponents equity estimation
///  - direct 7 card hand classification
///
/// ## Equity Calculator
///
/// ```
/// use holdem_equity::equity_calculator::equity;
/// // pocket threes on a double paired board, heads up
/// let eq = equity(&["3H", "3S"], &["8S", "4S", "QH", "8C", "4H"], 2, 10000).unwrap();
/// assert!(eq > 0.0 && eq < 1.0);
/// ```
///
/// ## Hand Evaluator
///
/// ```
/// use holdem_equity::card::Card;
/// use holdem_equity::hand_evaluator::{evaluate, HandTier};
/// let hand = ["AS", "KS", "QS", "JS", "TS", "2H", "3D"].map(|c| c.parse::<Card>().unwrap());
/// assert_eq!(evaluate(&hand).tier(), HandTier::StraightFlush);
/// ```

#[macro_use]
extern crate lazy_static;
extern crate crossbeam;
extern crate rand;
extern crate serde;

pub mod card;
pub mod constants;
pub mod hand_evaluator;

pub mod equity_calculator;
