//! Monte Carlo simulator of water transport across the lunar surface.
//!
//! Water molecules released on the Moon travel in ballistic hops. Each hop
//! either ends in photodestruction during flight or lands the molecule
//! somewhere new, where it may be captured by a cold trap near a pole.
//! Repeating this for many molecules gives the fraction of water that ends
//! up trapped at the poles.
//!
//! # Architecture
//!
//! The simulation is organized in layers:
//! 1. **Geometry** - Spherical positions, wrapping and great-circle hop updates
//! 2. **Physics** - Constants, model variants and the stateless hop physics
//! 3. **Particle** - One molecule's state and its per-hop transitions
//! 4. **Simulation** - Journeys, batches and multi-batch averaging
//!
//! # Example
//!
//! ```no_run
//! use lunarhop::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::butler_1997(42);
//! let mut sim = Simulation::new(config).unwrap();
//! let summary = sim.run_average();
//! println!("{:?}", summary.capture_fraction());
//! ```

pub mod geometry;
pub mod particle;
pub mod physics;
pub mod simulation;

pub use geometry::SphericalPosition;
pub use particle::{Fate, Particle};
pub use physics::{CapturePolicy, ModelVariant, PhysicalConstants};
pub use simulation::{
    BatchTally, RunSummary, Simulation, SimulationConfig, SimulationError, StartMode,
};
