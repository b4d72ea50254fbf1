//! Hopping molecule state machine.
//!
//! A [`Particle`] is `Active` until a hop ends in one of the terminal [`Fate`]s.
//! Running out of hops is decided by the caller, not by the particle.

mod molecule;

pub use molecule::{Fate, Particle};
