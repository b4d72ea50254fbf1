//! Physics of a single ballistic hop.
//!
//! Provides the physical constants, the model-variant selector and the
//! stateless kernel functions the particle state machine is built from.

mod constants;
mod variant;
pub mod kernel;

pub use constants::PhysicalConstants;
pub use variant::{CapturePolicy, ModelVariant};
pub use kernel::{
    thermal_speed, surface_temperature, sample_launch_angle, hop_duration, hop_ground_distance,
    hop_arc_length, photodestruction_probability, is_photodestroyed, is_captured, in_polar_cap,
    band_capture_percent, capture_probability_percent, degrees_from_equator, CAPTURE_BANDS,
};
