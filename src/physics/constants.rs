//! Physical constants used by the hopping model.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

/// Physical constants of the Moon and of the water molecule.
///
/// Units:
/// - lengths: m
/// - times: s
/// - temperatures: K
/// - masses: kg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Surface gravity of the Moon (m/s^2).
    pub gravity: f64,
    /// Mean lifetime of a molecule against photodestruction (s).
    pub photoloss_timescale_s: f64,
    /// Radius of the Moon (m).
    pub moon_radius_m: f64,
    /// Radius of each polar cold-trap cap (m).
    pub polar_cap_radius_m: f64,
    /// Molar mass of water (kg/mol).
    pub molar_mass_kg: f64,
    /// Avogadro's number (1/mol).
    pub avogadro: f64,
    /// Boltzmann's constant (J/K).
    pub boltzmann: f64,

    // Butler 1993 model
    pub fixed_surface_temp_k: f64,
    pub fixed_launch_angle_rad: f64,

    // Butler 1997 temperature profile: T0 + T1 * sin(phi)^N
    pub profile_base_k: f64,
    pub profile_amplitude_k: f64,
    pub profile_exponent: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            gravity: 1.625,
            photoloss_timescale_s: 6.7e4,
            moon_radius_m: 1_738_100.0,
            polar_cap_radius_m: 3.0e5,
            molar_mass_kg: 18.015e-3,
            avogadro: 6.0221e23,
            boltzmann: 1.38e-23,

            fixed_surface_temp_k: 500.0,
            fixed_launch_angle_rad: FRAC_PI_4,

            profile_base_k: 151.0,
            profile_amplitude_k: 161.7,
            profile_exponent: 0.59,
        }
    }
}

impl PhysicalConstants {
    /// Constants for the Moon.
    pub fn lunar() -> Self {
        Self::default()
    }

    /// Mass of a single water molecule (kg).
    pub fn molecule_mass(&self) -> f64 {
        self.molar_mass_kg / self.avogadro
    }

    /// Angular radius of the polar caps (radians), measured from either pole.
    pub fn polar_cap_half_angle(&self) -> f64 {
        self.polar_cap_radius_m / self.moon_radius_m
    }

    /// Returns the name of the first field that is not a finite positive number.
    pub fn first_invalid(&self) -> Option<&'static str> {
        let fields = [
            ("gravity", self.gravity),
            ("photoloss_timescale_s", self.photoloss_timescale_s),
            ("moon_radius_m", self.moon_radius_m),
            ("polar_cap_radius_m", self.polar_cap_radius_m),
            ("molar_mass_kg", self.molar_mass_kg),
            ("avogadro", self.avogadro),
            ("boltzmann", self.boltzmann),
            ("fixed_surface_temp_k", self.fixed_surface_temp_k),
            ("fixed_launch_angle_rad", self.fixed_launch_angle_rad),
            ("profile_base_k", self.profile_base_k),
            ("profile_amplitude_k", self.profile_amplitude_k),
            ("profile_exponent", self.profile_exponent),
        ];
        fields
            .iter()
            .find(|(_, v)| !v.is_finite() || *v <= 0.0)
            .map(|(name, _)| *name)
    }
}
