mod evaluator;
mod score;
mod showdown;

pub use evaluator::evaluate;
pub use score::{HandScore, HandTier, TIER_COUNT};
pub use showdown::{is_hero_winner, winners};
