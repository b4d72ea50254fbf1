//! Spherical coordinates on the unit sphere and the great-circle hop update.

use glam::DVec3;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Co-latitude of the fixed reference start point (degrees from the pole).
pub const REFERENCE_COLATITUDE_DEG: f64 = 70.0;

/// Wraps an azimuth into `[0, 2π)`.
///
/// Works for any finite input, however many turns it is away from the range.
pub fn wrap_azimuth(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// A point on the unit sphere.
///
/// - `phi`: co-latitude in `[0, π]`, 0 at the reference pole
/// - `beta`: azimuth in `[0, 2π)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalPosition {
    pub phi: f64,
    pub beta: f64,
}

impl SphericalPosition {
    /// Creates a position, wrapping `beta` into `[0, 2π)`.
    pub fn new(phi: f64, beta: f64) -> Self {
        Self {
            phi,
            beta: wrap_azimuth(beta),
        }
    }

    /// Creates a position from angles in degrees.
    pub fn from_degrees(phi_deg: f64, beta_deg: f64) -> Self {
        Self::new(phi_deg.to_radians(), beta_deg.to_radians())
    }

    /// The fixed reference start point: 70° from the pole at zero azimuth.
    pub fn reference() -> Self {
        Self::from_degrees(REFERENCE_COLATITUDE_DEG, 0.0)
    }

    /// Draws a point uniformly distributed over the sphere.
    ///
    /// Three standard normal draws (x, y, z order) give an isotropic direction,
    /// which is then converted with [`SphericalPosition::from_unit_vector`].
    pub fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x: f64 = rng.sample(StandardNormal);
        let y: f64 = rng.sample(StandardNormal);
        let z: f64 = rng.sample(StandardNormal);
        Self::from_unit_vector(DVec3::new(x, y, z).normalize_or_zero())
    }

    /// Converts a unit vector to spherical coordinates, with `y` as the polar axis.
    ///
    /// The azimuth is `sign(x) * arccos(z / sqrt(x² + z²))`. A vector with
    /// `x == 0` takes the positive sign, and one lying on the polar axis gets
    /// zero azimuth.
    pub fn from_unit_vector(v: DVec3) -> Self {
        let phi = v.y.clamp(-1.0, 1.0).acos();
        let rho = (v.z * v.z + v.x * v.x).sqrt();
        if rho == 0.0 {
            return Self::new(phi, 0.0);
        }
        let sign = if v.x < 0.0 { -1.0 } else { 1.0 };
        let beta = sign * (v.z / rho).clamp(-1.0, 1.0).acos();
        Self::new(phi, beta)
    }

    /// Converts to a Cartesian unit vector `(sin φ sin β, cos φ, sin φ cos β)`.
    pub fn to_cartesian(&self) -> DVec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_beta, cos_beta) = self.beta.sin_cos();
        DVec3::new(sin_phi * sin_beta, cos_phi, sin_phi * cos_beta)
    }

    /// Degrees between this point and the equator, in `[0, 90]`.
    pub fn degrees_from_equator(&self) -> f64 {
        (self.phi.to_degrees() - 90.0).abs()
    }

    /// Great-circle angle (radians) between two positions.
    pub fn angular_distance(&self, other: &SphericalPosition) -> f64 {
        self.to_cartesian()
            .dot(other.to_cartesian())
            .clamp(-1.0, 1.0)
            .acos()
    }

    /// Moves `arc_length` radians along a great circle at bearing `psi`.
    ///
    /// The new co-latitude comes from the spherical law of cosines,
    ///
    /// `cos φ' = cos φ cos δ + sin φ sin δ cos ψ`,
    ///
    /// and the azimuth change `ε` from the same law solved for the angle at the pole,
    ///
    /// `cos ε = (cos δ − cos φ' cos φ) / (sin φ' sin φ)`.
    ///
    /// `ε` is added when `psi > π` and subtracted otherwise. Both cosines are
    /// clamped to `[-1, 1]`. When either endpoint sits exactly on a pole the
    /// azimuth is undefined and is left unchanged.
    pub fn hop(&self, arc_length: f64, psi: f64) -> SphericalPosition {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_arc, cos_arc) = arc_length.sin_cos();

        let cos_phi_new = (cos_phi * cos_arc + sin_phi * sin_arc * psi.cos()).clamp(-1.0, 1.0);
        let phi_new = cos_phi_new.acos();

        let denom = phi_new.sin() * sin_phi;
        let epsilon = if denom == 0.0 {
            0.0
        } else {
            ((cos_arc - phi_new.cos() * cos_phi) / denom)
                .clamp(-1.0, 1.0)
                .acos()
        };

        let beta_new = if psi > PI {
            self.beta + epsilon
        } else {
            self.beta - epsilon
        };
        SphericalPosition::new(phi_new, beta_new)
    }
}
