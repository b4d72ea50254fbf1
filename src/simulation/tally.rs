//! Outcome counting for batches and full runs.

use serde::{Deserialize, Serialize};

use super::StartMode;
use crate::particle::Fate;
use crate::physics::ModelVariant;

/// Counts of molecule outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTally {
    /// Molecules photodestroyed in flight.
    pub destroyed: usize,
    /// Molecules captured in a cold trap.
    pub captured: usize,
    /// Molecules still hopping when the hop cap was reached.
    pub exhausted: usize,
}

impl BatchTally {
    /// Counts one molecule; `None` means it ran out of hops.
    pub fn record(&mut self, fate: Option<Fate>) {
        match fate {
            Some(Fate::Photodestroyed) => self.destroyed += 1,
            Some(Fate::Captured) => self.captured += 1,
            None => self.exhausted += 1,
        }
    }

    /// Adds another tally into this one.
    pub fn merge(&mut self, other: &BatchTally) {
        self.destroyed += other.destroyed;
        self.captured += other.captured;
        self.exhausted += other.exhausted;
    }

    /// All molecules counted.
    pub fn particles(&self) -> usize {
        self.destroyed + self.captured + self.exhausted
    }

    /// Molecules that reached a terminal fate.
    pub fn resolved(&self) -> usize {
        self.destroyed + self.captured
    }

    /// `captured / (captured + destroyed)`.
    ///
    /// Exhausted molecules are left out of the denominator. Returns `None`
    /// when no molecule was resolved.
    pub fn capture_fraction(&self) -> Option<f64> {
        let resolved = self.resolved();
        if resolved == 0 {
            return None;
        }
        Some(self.captured as f64 / resolved as f64)
    }
}

/// Result of a multi-batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub variant: ModelVariant,
    pub start: StartMode,
    pub particles_per_batch: usize,
    pub seed: u64,
    /// Per-batch tallies in run order.
    pub batches: Vec<BatchTally>,
    /// Sum of all batch tallies.
    pub total: BatchTally,
}

impl RunSummary {
    /// Capture fraction over the whole run.
    pub fn capture_fraction(&self) -> Option<f64> {
        self.total.capture_fraction()
    }

    /// Mean and sample standard deviation of the per-batch capture fractions.
    ///
    /// Batches with nothing resolved are skipped. Returns `None` when no batch
    /// has a capture fraction.
    pub fn batch_fraction_stats(&self) -> Option<(f64, f64)> {
        let fractions: Vec<f64> = self
            .batches
            .iter()
            .filter_map(|b| b.capture_fraction())
            .collect();
        if fractions.is_empty() {
            return None;
        }
        let n = fractions.len() as f64;
        let mean = fractions.iter().sum::<f64>() / n;
        if fractions.len() < 2 {
            return Some((mean, 0.0));
        }
        let var = fractions.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / (n - 1.0);
        Some((mean, var.sqrt()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_counts() {
        let mut tally = BatchTally::default();
        tally.record(Some(Fate::Photodestroyed));
        tally.record(Some(Fate::Photodestroyed));
        tally.record(Some(Fate::Captured));
        tally.record(None);

        assert_eq!(tally.destroyed, 2);
        assert_eq!(tally.captured, 1);
        assert_eq!(tally.exhausted, 1);
        assert_eq!(tally.particles(), 4);
        assert_eq!(tally.resolved(), 3);
    }

    #[test]
    fn test_capture_fraction_excludes_exhausted() {
        let tally = BatchTally {
            destroyed: 30,
            captured: 10,
            exhausted: 60,
        };
        assert_eq!(tally.capture_fraction(), Some(0.25));

        let more_exhausted = BatchTally {
            exhausted: 1000,
            ..tally
        };
        assert_eq!(more_exhausted.capture_fraction(), tally.capture_fraction());
    }

    #[test]
    fn test_capture_fraction_undefined_without_resolved() {
        let tally = BatchTally {
            exhausted: 5,
            ..Default::default()
        };
        assert_eq!(tally.capture_fraction(), None);
        assert_eq!(BatchTally::default().capture_fraction(), None);
    }

    #[test]
    fn test_merge() {
        let mut a = BatchTally {
            destroyed: 1,
            captured: 2,
            exhausted: 3,
        };
        a.merge(&BatchTally {
            destroyed: 10,
            captured: 20,
            exhausted: 30,
        });
        assert_eq!(
            a,
            BatchTally {
                destroyed: 11,
                captured: 22,
                exhausted: 33,
            }
        );
    }

    #[test]
    fn test_batch_fraction_stats() {
        let summary = RunSummary {
            variant: ModelVariant::ButlerA,
            start: StartMode::Reference,
            particles_per_batch: 4,
            seed: 0,
            batches: vec![
                BatchTally { destroyed: 3, captured: 1, exhausted: 0 },
                BatchTally { destroyed: 1, captured: 3, exhausted: 0 },
                BatchTally { destroyed: 0, captured: 0, exhausted: 4 },
            ],
            total: BatchTally { destroyed: 4, captured: 4, exhausted: 4 },
        };
        let (mean, sd) = summary.batch_fraction_stats().unwrap();
        assert!((mean - 0.5).abs() < 1e-12);
        // Fractions 0.25 and 0.75: sample sd = sqrt(0.125)
        assert!((sd - 0.125_f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.capture_fraction(), Some(0.5));
    }
}
