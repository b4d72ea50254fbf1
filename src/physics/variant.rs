//! Model variant selection.

use serde::{Deserialize, Serialize};

/// Which published parameterization drives the hop physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelVariant {
    /// Butler (1997): latitude-dependent surface temperature, cosine-law
    /// launch angles and latitude-banded capture probabilities.
    ButlerA,
    /// Butler (1993): constant 500 K surface, fixed 45° launch angle and
    /// deterministic capture inside fixed polar caps.
    ButlerB,
}

impl ModelVariant {
    /// Returns both variants.
    pub const fn all() -> [ModelVariant; 2] {
        [ModelVariant::ButlerA, ModelVariant::ButlerB]
    }

    /// Year of the paper the variant follows.
    pub const fn paper_year(self) -> u16 {
        match self {
            ModelVariant::ButlerA => 1997,
            ModelVariant::ButlerB => 1993,
        }
    }

    /// Returns a short name for the variant (e.g., "butler1997").
    pub const fn short_name(self) -> &'static str {
        match self {
            ModelVariant::ButlerA => "butler1997",
            ModelVariant::ButlerB => "butler1993",
        }
    }

    /// The capture law the variant uses.
    pub const fn capture_policy(self) -> CapturePolicy {
        match self {
            ModelVariant::ButlerA => CapturePolicy::LatitudeBands,
            ModelVariant::ButlerB => CapturePolicy::PolarCap,
        }
    }
}

/// How a landed particle is tested for cold-trap capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapturePolicy {
    /// Captured iff the landing point lies inside either polar cap.
    PolarCap,
    /// Captured with a probability that grows with distance from the equator.
    LatitudeBands,
}
