mod deck;
mod simulator;

pub use simulator::{calc_equity, equity, simulate, SimulationResults, SimulatorError};
