//! Monte Carlo runs over many hopping molecules.
//!
//! Molecules are independent; a run is a sequence of batches, each a sequence
//! of single-molecule journeys drawn from one seeded random stream.

mod config;
mod runner;
mod tally;

pub use config::{SimulationConfig, StartMode};
pub use runner::{Batch, Journey, ParticleOutcome, Simulation, SimulationError};
pub use tally::{BatchTally, RunSummary};
