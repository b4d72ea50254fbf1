//! A single hopping water molecule.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::geometry::SphericalPosition;
use crate::physics::{
    hop_arc_length, hop_duration, is_captured, is_photodestroyed, sample_launch_angle,
    surface_temperature, thermal_speed, ModelVariant, PhysicalConstants,
};

/// How a molecule left the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fate {
    /// Destroyed by solar radiation during a hop.
    Photodestroyed,
    /// Trapped in a polar cold region after landing.
    Captured,
}

impl Fate {
    /// Returns the name of the fate.
    pub fn name(&self) -> &'static str {
        match self {
            Fate::Photodestroyed => "photodestroyed",
            Fate::Captured => "captured",
        }
    }
}

/// One water molecule hopping across the lunar surface.
///
/// The launch conditions (`temperature_k`, `speed`, `launch_angle`,
/// `hop_duration`) always describe the hop that starts from the current
/// position. One hop must be driven in this exact order:
///
/// 1. [`Particle::advance`]
/// 2. [`Particle::check_photodestroyed`]
/// 3. [`Particle::check_captured`]
/// 4. [`Particle::update_conditions_for_next_hop`] if neither check fired
///
/// [`Particle::step`] runs that sequence.
#[derive(Debug, Clone)]
pub struct Particle<'a> {
    position: SphericalPosition,
    variant: ModelVariant,
    temperature_k: f64,
    mass: f64,
    launch_angle: f64,
    speed: f64,
    hop_duration: f64,
    arc_length: f64,
    hops: u32,
    constants: &'a PhysicalConstants,
}

impl<'a> Particle<'a> {
    /// Places a molecule at `start` and computes its first launch conditions.
    ///
    /// Draws one launch angle from `rng` for Butler (1997); Butler (1993) draws nothing.
    pub fn new<R: Rng + ?Sized>(
        start: SphericalPosition,
        variant: ModelVariant,
        constants: &'a PhysicalConstants,
        rng: &mut R,
    ) -> Self {
        let temperature_k = surface_temperature(start.phi, variant, constants);
        let mass = constants.molecule_mass();
        let launch_angle = sample_launch_angle(variant, rng, constants);
        let speed = thermal_speed(mass, temperature_k, constants);
        let hop_duration = hop_duration(speed, launch_angle, constants);
        let arc_length = hop_arc_length(speed, launch_angle, constants);

        Self {
            position: SphericalPosition::new(start.phi, start.beta),
            variant,
            temperature_k,
            mass,
            launch_angle,
            speed,
            hop_duration,
            arc_length,
            hops: 0,
            constants,
        }
    }

    pub fn position(&self) -> SphericalPosition {
        self.position
    }

    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    /// Surface temperature (K) at the launch point of the current hop.
    pub fn temperature_k(&self) -> f64 {
        self.temperature_k
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn launch_angle(&self) -> f64 {
        self.launch_angle
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Flight time (s) of the hop most recently launched.
    pub fn hop_duration(&self) -> f64 {
        self.hop_duration
    }

    /// Arc length (radians) of the most recent `advance`.
    ///
    /// Not refreshed by [`Particle::update_conditions_for_next_hop`].
    pub fn arc_length(&self) -> f64 {
        self.arc_length
    }

    /// Number of completed hops.
    pub fn hops(&self) -> u32 {
        self.hops
    }

    /// Flies one hop: moves `arc_length` radians in a random direction.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.arc_length = hop_arc_length(self.speed, self.launch_angle, self.constants);
        let psi = rng.random_range(0.0..TAU);
        self.position = self.position.hop(self.arc_length, psi);
        self.hops += 1;
    }

    /// Draws whether the hop just flown destroyed the molecule.
    ///
    /// Every call is an independent draw.
    pub fn check_photodestroyed<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        is_photodestroyed(self.hop_duration, rng, self.constants)
    }

    /// Decides whether the molecule is captured where it landed.
    ///
    /// Every call is an independent draw under the banded capture law.
    pub fn check_captured<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        is_captured(
            self.position.phi,
            self.variant.capture_policy(),
            rng,
            self.constants,
        )
    }

    /// Recomputes the launch conditions for a hop starting at the current position.
    pub fn update_conditions_for_next_hop<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.temperature_k = surface_temperature(self.position.phi, self.variant, self.constants);
        self.speed = thermal_speed(self.mass, self.temperature_k, self.constants);
        self.launch_angle = sample_launch_angle(self.variant, rng, self.constants);
        self.hop_duration = hop_duration(self.speed, self.launch_angle, self.constants);
    }

    /// Runs one full hop and returns the fate if the molecule was removed.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Fate> {
        self.advance(rng);
        if self.check_photodestroyed(rng) {
            return Some(Fate::Photodestroyed);
        }
        if self.check_captured(rng) {
            return Some(Fate::Captured);
        }
        self.update_conditions_for_next_hop(rng);
        None
    }
}
