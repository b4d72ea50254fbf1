//! Simulation run configuration.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::SimulationError;
use crate::geometry::SphericalPosition;
use crate::physics::{ModelVariant, PhysicalConstants};

/// Where newly released molecules start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartMode {
    /// Fixed reference point, 70° from the pole at zero azimuth.
    #[default]
    Reference,
    /// Uniformly random point on the sphere.
    Random,
}

impl StartMode {
    /// Returns a short name for the start mode.
    pub fn name(&self) -> &'static str {
        match self {
            StartMode::Reference => "reference",
            StartMode::Random => "random",
        }
    }

    /// Picks the start position of a new molecule.
    pub fn initial_position<R: Rng + ?Sized>(&self, rng: &mut R) -> SphericalPosition {
        match self {
            StartMode::Reference => SphericalPosition::reference(),
            StartMode::Random => SphericalPosition::sample_uniform(rng),
        }
    }
}

/// Parameters for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// How start positions are chosen.
    pub start: StartMode,
    /// Physical model variant.
    pub variant: ModelVariant,
    /// Hops after which an unresolved molecule is abandoned.
    pub max_hops: u32,
    /// Molecules released per batch.
    pub particles_per_batch: usize,
    /// Number of batches averaged by a full run.
    pub batches: usize,
    /// Random seed for reproducible runs.
    pub seed: u64,
    /// Physical constants injected into the hop physics.
    pub constants: PhysicalConstants,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: StartMode::default(),
            variant: ModelVariant::ButlerA,
            max_hops: 1000,
            particles_per_batch: 100,
            batches: 50,
            seed: 42,
            constants: PhysicalConstants::lunar(),
        }
    }
}

impl SimulationConfig {
    /// Butler (1997) model with default run sizes.
    pub fn butler_1997(seed: u64) -> Self {
        Self {
            variant: ModelVariant::ButlerA,
            seed,
            ..Default::default()
        }
    }

    /// Butler (1993) model with default run sizes.
    pub fn butler_1993(seed: u64) -> Self {
        Self {
            variant: ModelVariant::ButlerB,
            seed,
            ..Default::default()
        }
    }

    /// Total number of molecules released by a full run.
    pub fn total_particles(&self) -> usize {
        self.particles_per_batch * self.batches
    }

    /// Checks run sizes and physical constants.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.particles_per_batch == 0 {
            return Err(SimulationError::InvalidConfig(
                "particles_per_batch must be > 0".into(),
            ));
        }
        if self.batches == 0 {
            return Err(SimulationError::InvalidConfig("batches must be > 0".into()));
        }
        if let Some(name) = self.constants.first_invalid() {
            return Err(SimulationError::InvalidConstant(name));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.max_hops, 1000);
        assert_eq!(config.particles_per_batch, 100);
        assert_eq!(config.batches, 50);
        assert_eq!(config.total_particles(), 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_start_is_reference() {
        assert_eq!(StartMode::default(), StartMode::Reference);
        assert_eq!(SimulationConfig::default().start, StartMode::Reference);
    }

    #[test]
    fn test_presets() {
        let config = SimulationConfig::butler_1993(7);
        assert_eq!(config.variant, ModelVariant::ButlerB);
        assert_eq!(config.seed, 7);

        let config = SimulationConfig::butler_1997(8);
        assert_eq!(config.variant, ModelVariant::ButlerA);
        assert_eq!(config.seed, 8);
    }

    #[test]
    fn test_validate_rejects_empty_runs() {
        let config = SimulationConfig {
            particles_per_batch: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("particles_per_batch"));

        let config = SimulationConfig {
            batches: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_constants() {
        let mut config = SimulationConfig::default();
        config.constants.moon_radius_m = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("moon_radius_m"));
    }

    #[test]
    fn test_reference_start_draws_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut reference = ChaCha8Rng::seed_from_u64(3);
        let p = StartMode::Reference.initial_position(&mut rng);
        assert_eq!(p, SphericalPosition::reference());
        assert_eq!(rng.random::<u64>(), reference.random::<u64>());
    }

    #[test]
    fn test_random_start_varies() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let a = StartMode::Random.initial_position(&mut rng);
        let b = StartMode::Random.initial_position(&mut rng);
        assert_ne!(a, b);
    }
}
