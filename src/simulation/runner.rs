//! The hop loop and the three run modes: single journey, one batch, and the
//! multi-batch average.

use log::{debug, info, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BatchTally, RunSummary, SimulationConfig};
use crate::geometry::SphericalPosition;
use crate::particle::{Fate, Particle};

/// Errors that can occur when setting up a simulation.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Physical constant '{0}' must be finite and > 0")]
    InvalidConstant(&'static str),
}

/// What happened to one molecule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleOutcome {
    /// Terminal fate, or `None` if the hop cap was reached first.
    pub fate: Option<Fate>,
    /// Hops flown, including the one that ended the journey.
    pub hops: u32,
    /// Where the molecule was when it left the simulation.
    pub final_position: SphericalPosition,
}

impl ParticleOutcome {
    /// True if the molecule was abandoned at the hop cap.
    pub fn is_exhausted(&self) -> bool {
        self.fate.is_none()
    }
}

/// Full path of a single molecule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    /// Launch point of every hop, followed by the final position.
    pub positions: Vec<SphericalPosition>,
    pub outcome: ParticleOutcome,
}

/// Outcomes of one batch of molecules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub tally: BatchTally,
    /// One entry per molecule, in release order.
    pub outcomes: Vec<ParticleOutcome>,
}

/// Runs molecules from a validated configuration with a single seeded random stream.
pub struct Simulation {
    config: SimulationConfig,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Validates `config` and seeds the random stream from `config.seed`.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Releases one molecule and follows it until it is removed or the hop cap is hit.
    pub fn simulate_particle(&mut self) -> ParticleOutcome {
        self.fly(|_| {})
    }

    /// Follows one molecule, recording every position it visits.
    pub fn journey(&mut self) -> Journey {
        let mut positions = Vec::new();
        let outcome = self.fly(|p| positions.push(*p));
        positions.push(outcome.final_position);
        Journey { positions, outcome }
    }

    /// Releases `particles_per_batch` molecules one after another.
    pub fn run_batch(&mut self) -> Batch {
        let n = self.config.particles_per_batch;
        let mut tally = BatchTally::default();
        let mut outcomes = Vec::with_capacity(n);

        for _ in 0..n {
            let outcome = self.simulate_particle();
            tally.record(outcome.fate);
            outcomes.push(outcome);
        }

        info!(
            "batch done: {} destroyed, {} captured, {} exhausted",
            tally.destroyed, tally.captured, tally.exhausted
        );
        Batch { tally, outcomes }
    }

    /// Runs all configured batches and sums their tallies.
    pub fn run_average(&mut self) -> RunSummary {
        self.run_average_with_callbacks(|_, _| {}, |_, _, _| {})
    }

    /// Runs all configured batches with progress callbacks.
    ///
    /// # Arguments
    /// * `on_batch_start` - Called with `(batch index, batch count)` before each batch
    /// * `on_batch_complete` - Called with the index, count and tally after each batch
    pub fn run_average_with_callbacks<F1, F2>(
        &mut self,
        mut on_batch_start: F1,
        mut on_batch_complete: F2,
    ) -> RunSummary
    where
        F1: FnMut(usize, usize),
        F2: FnMut(usize, usize, &BatchTally),
    {
        let total_batches = self.config.batches;
        let mut batches = Vec::with_capacity(total_batches);
        let mut total = BatchTally::default();

        for i in 0..total_batches {
            on_batch_start(i, total_batches);
            let batch = self.run_batch();
            total.merge(&batch.tally);
            on_batch_complete(i, total_batches, &batch.tally);
            batches.push(batch.tally);
        }

        match total.capture_fraction() {
            Some(f) => info!("run done: {:.2}% captured over {} batches", f * 100.0, total_batches),
            None => info!("run done: no molecule resolved over {} batches", total_batches),
        }

        RunSummary {
            variant: self.config.variant,
            start: self.config.start,
            particles_per_batch: self.config.particles_per_batch,
            seed: self.config.seed,
            batches,
            total,
        }
    }

    /// The hop loop. `on_launch` sees the launch point of every hop.
    fn fly<F>(&mut self, mut on_launch: F) -> ParticleOutcome
    where
        F: FnMut(&SphericalPosition),
    {
        let Self { config, rng } = self;
        let start = config.start.initial_position(rng);
        let mut particle = Particle::new(start, config.variant, &config.constants, rng);

        for _ in 0..config.max_hops {
            on_launch(&particle.position());
            if let Some(fate) = particle.step(rng) {
                let outcome = ParticleOutcome {
                    fate: Some(fate),
                    hops: particle.hops(),
                    final_position: particle.position(),
                };
                debug!("molecule {} after {} hops", fate.name(), outcome.hops);
                return outcome;
            }
            trace!(
                "hop {}: phi={:.4} beta={:.4}",
                particle.hops(),
                particle.position().phi,
                particle.position().beta
            );
        }

        debug!("molecule still hopping after {} hops", config.max_hops);
        ParticleOutcome {
            fate: None,
            hops: particle.hops(),
            final_position: particle.position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{in_polar_cap, ModelVariant, PhysicalConstants};
    use crate::simulation::StartMode;

    fn small_config(variant: ModelVariant, seed: u64) -> SimulationConfig {
        SimulationConfig {
            variant,
            particles_per_batch: 100,
            batches: 3,
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimulationConfig {
            batches: 0,
            ..Default::default()
        };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_reference_batch_counts() {
        for variant in ModelVariant::all() {
            let mut sim = Simulation::new(small_config(variant, 2024)).unwrap();
            let batch = sim.run_batch();

            assert_eq!(batch.outcomes.len(), 100);
            assert_eq!(batch.tally.particles(), 100);
            assert!(batch.tally.captured + batch.tally.destroyed <= 100);

            for outcome in &batch.outcomes {
                assert!(outcome.hops <= 1000);
                if outcome.fate == Some(Fate::Captured) {
                    // Captured only after leaving the reference latitude.
                    assert!(outcome.hops >= 1);
                }
                if outcome.is_exhausted() {
                    assert_eq!(outcome.hops, 1000);
                }
            }
        }
    }

    #[test]
    fn test_polar_cap_captures_land_inside_cap() {
        let mut sim = Simulation::new(small_config(ModelVariant::ButlerB, 7)).unwrap();
        let constants = PhysicalConstants::lunar();
        let batch = sim.run_batch();
        assert!(batch.tally.captured > 0);
        for outcome in batch.outcomes.iter().filter(|o| o.fate == Some(Fate::Captured)) {
            assert!(in_polar_cap(outcome.final_position.phi, &constants));
        }
    }

    #[test]
    fn test_zero_hop_cap_exhausts_everything() {
        let config = SimulationConfig {
            max_hops: 0,
            particles_per_batch: 20,
            ..Default::default()
        };
        let mut sim = Simulation::new(config).unwrap();
        let batch = sim.run_batch();
        assert_eq!(batch.tally.exhausted, 20);
        assert_eq!(batch.tally.capture_fraction(), None);
        for outcome in &batch.outcomes {
            assert_eq!(outcome.hops, 0);
            assert_eq!(outcome.final_position, SphericalPosition::reference());
        }
    }

    #[test]
    fn test_journey_records_every_launch_point() {
        let mut sim = Simulation::new(SimulationConfig::butler_1993(11)).unwrap();
        let journey = sim.journey();

        assert_eq!(journey.positions.len(), journey.outcome.hops as usize + 1);
        assert_eq!(journey.positions[0], SphericalPosition::reference());
        assert_eq!(journey.positions.last(), Some(&journey.outcome.final_position));

        // Fixed model: every hop covers the same arc.
        let first = journey.positions[0].angular_distance(&journey.positions[1]);
        for pair in journey.positions.windows(2) {
            let d = pair[0].angular_distance(&pair[1]);
            assert!((d - first).abs() < 1e-6, "hop of {} vs {}", d, first);
        }
    }

    #[test]
    fn test_random_start_journey_begins_off_reference() {
        let config = SimulationConfig {
            start: StartMode::Random,
            ..SimulationConfig::butler_1997(5)
        };
        let mut sim = Simulation::new(config).unwrap();
        let journey = sim.journey();
        assert_ne!(journey.positions[0], SphericalPosition::reference());
    }

    #[test]
    fn test_run_average_is_reproducible() {
        let run = |seed| {
            let mut sim = Simulation::new(small_config(ModelVariant::ButlerA, seed)).unwrap();
            sim.run_average()
        };
        let a = run(99);
        let b = run(99);
        assert_eq!(a, b);
        assert_eq!(a.batches.len(), 3);
        assert_eq!(a.total.particles(), 300);
        assert_eq!(a.seed, 99);
    }

    #[test]
    fn test_run_average_totals_match_batches() {
        let mut sim = Simulation::new(small_config(ModelVariant::ButlerB, 3)).unwrap();
        let summary = sim.run_average();

        let mut sum = BatchTally::default();
        for b in &summary.batches {
            sum.merge(b);
        }
        assert_eq!(sum, summary.total);

        let fraction = summary.capture_fraction().unwrap();
        let expected =
            summary.total.captured as f64 / (summary.total.captured + summary.total.destroyed) as f64;
        assert_eq!(fraction, expected);
        assert!((0.0..=1.0).contains(&fraction));
    }

    #[test]
    fn test_run_average_with_callbacks() {
        let mut sim = Simulation::new(small_config(ModelVariant::ButlerA, 1)).unwrap();
        let mut started = Vec::new();
        let mut completed = Vec::new();

        let summary = sim.run_average_with_callbacks(
            |i, total| started.push((i, total)),
            |i, total, tally| completed.push((i, total, *tally)),
        );

        assert_eq!(started, vec![(0, 3), (1, 3), (2, 3)]);
        assert_eq!(completed.len(), 3);
        for (i, (idx, total, tally)) in completed.iter().enumerate() {
            assert_eq!(*idx, i);
            assert_eq!(*total, 3);
            assert_eq!(*tally, summary.batches[i]);
        }
    }
}
