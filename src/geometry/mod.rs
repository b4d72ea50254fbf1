//! Spherical geometry module.
//!
//! Positions on the unit sphere, azimuth wrapping and the great-circle
//! update used to move a molecule by one hop.

mod spherical;

pub use spherical::{SphericalPosition, wrap_azimuth, REFERENCE_COLATITUDE_DEG};
