//! Per-hop physics: surface temperature, thermal speed, ballistic hop geometry
//! and the two terminating draws (photodestruction, cold-trap capture).
//!
//! Everything here is a pure function of its inputs. Randomized functions take
//! the random source explicitly so that runs are reproducible from a seed.

use rand::Rng;
use std::f64::consts::{FRAC_PI_2, PI};

use super::{CapturePolicy, ModelVariant, PhysicalConstants};
use crate::geometry::SphericalPosition;

/// Capture bands for the latitude-banded policy, as
/// `(degrees from equator, capture probability in percent)`.
///
/// Checked top to bottom with strict `>`, so a point sitting exactly on an
/// edge falls into the band below it.
pub const CAPTURE_BANDS: [(f64, f64); 4] = [(80.0, 11.0), (70.0, 4.0), (60.0, 0.9), (50.0, 0.4)];

/// RMS thermal speed (m/s) of a molecule of `mass` (kg) at `temperature_k`.
///
/// Only meaningful for positive temperatures.
pub fn thermal_speed(mass: f64, temperature_k: f64, c: &PhysicalConstants) -> f64 {
    ((3.0 * c.boltzmann * temperature_k) / mass).sqrt()
}

/// Surface temperature (K) at co-latitude `phi`.
pub fn surface_temperature(phi: f64, variant: ModelVariant, c: &PhysicalConstants) -> f64 {
    match variant {
        ModelVariant::ButlerB => c.fixed_surface_temp_k,
        ModelVariant::ButlerA => {
            // cos(phi - pi/2) is non-negative on [0, pi]; the clamp only absorbs rounding.
            let s = (phi - FRAC_PI_2).cos().max(0.0);
            c.profile_base_k + c.profile_amplitude_k * s.powf(c.profile_exponent)
        }
    }
}

/// Draws the launch angle (radians from the horizontal) for the next hop.
///
/// Butler (1997) uses `arccos(U)` with `U ~ U[0, 1)`, a cosine emission law.
pub fn sample_launch_angle<R: Rng + ?Sized>(
    variant: ModelVariant,
    rng: &mut R,
    c: &PhysicalConstants,
) -> f64 {
    match variant {
        ModelVariant::ButlerB => c.fixed_launch_angle_rad,
        ModelVariant::ButlerA => rng.random::<f64>().acos(),
    }
}

/// Time of flight (s) of a ballistic hop under constant surface gravity.
pub fn hop_duration(speed: f64, launch_angle: f64, c: &PhysicalConstants) -> f64 {
    2.0 * speed * launch_angle.sin() / c.gravity
}

/// Ground range (m) of a ballistic hop.
pub fn hop_ground_distance(speed: f64, launch_angle: f64, c: &PhysicalConstants) -> f64 {
    speed * launch_angle.cos() * hop_duration(speed, launch_angle, c)
}

/// Angular distance (radians) covered by a hop along the surface.
pub fn hop_arc_length(speed: f64, launch_angle: f64, c: &PhysicalConstants) -> f64 {
    hop_ground_distance(speed, launch_angle, c) / c.moon_radius_m
}

/// Probability that a molecule is photodestroyed during a hop lasting `hop_duration` seconds.
pub fn photodestruction_probability(hop_duration: f64, c: &PhysicalConstants) -> f64 {
    1.0 - (-hop_duration / c.photoloss_timescale_s).exp()
}

/// Draws whether a molecule is photodestroyed during a hop of `hop_duration` seconds.
pub fn is_photodestroyed<R: Rng + ?Sized>(
    hop_duration: f64,
    rng: &mut R,
    c: &PhysicalConstants,
) -> bool {
    let p = photodestruction_probability(hop_duration, c);
    rng.random::<f64>() < p
}

/// Degrees between co-latitude `phi` and the equator, in [0, 90].
pub fn degrees_from_equator(phi: f64) -> f64 {
    SphericalPosition { phi, beta: 0.0 }.degrees_from_equator()
}

/// Capture probability (percent) for a point `offset_deg` degrees from the equator.
pub fn band_capture_percent(offset_deg: f64) -> f64 {
    CAPTURE_BANDS
        .iter()
        .find(|(edge, _)| offset_deg > *edge)
        .map(|(_, percent)| *percent)
        .unwrap_or(0.0)
}

/// Capture probability (percent) for a molecule landed at co-latitude `phi`.
pub fn capture_probability_percent(phi: f64) -> f64 {
    band_capture_percent(degrees_from_equator(phi))
}

/// True if co-latitude `phi` lies strictly inside either polar cap.
pub fn in_polar_cap(phi: f64, c: &PhysicalConstants) -> bool {
    let cap = c.polar_cap_half_angle();
    if phi > FRAC_PI_2 {
        return (PI - phi) < cap;
    }
    phi < cap
}

/// Decides whether a molecule that just landed at co-latitude `phi` is captured.
///
/// The polar-cap policy is deterministic and consumes no random numbers. The
/// banded policy draws one number on `[0, 100)` only when the band has a
/// non-zero capture rate.
pub fn is_captured<R: Rng + ?Sized>(
    phi: f64,
    policy: CapturePolicy,
    rng: &mut R,
    c: &PhysicalConstants,
) -> bool {
    match policy {
        CapturePolicy::PolarCap => in_polar_cap(phi, c),
        CapturePolicy::LatitudeBands => {
            let percent = capture_probability_percent(phi);
            if percent <= 0.0 {
                return false;
            }
            rng.random_range(0.0..100.0) < percent
        }
    }
}
