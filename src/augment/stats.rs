//! Per-call augmentation counters.

use serde::{Deserialize, Serialize};

/// What happened to the segments of one (or several merged) batches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AugmentStats {
    /// Segments seen
    pub items: usize,
    /// Segments that received a fuzzy match
    pub augmented: usize,
    /// Segments skipped because they already carry the marker token
    pub already_marked: usize,
    /// Segments whose best candidate was an exact match
    pub exact_matches: usize,
    /// Segments with no candidate at or above the threshold
    pub below_threshold: usize,
    /// Chunks sent to the scorer
    pub chunks_scored: usize,
    /// Chunks copied through without scoring
    pub chunks_skipped: usize,
    /// Wall-clock time spent, in seconds
    pub elapsed_secs: f64,
}

impl AugmentStats {
    pub(crate) fn new(items: usize) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Fraction of segments that were augmented.
    #[must_use]
    pub fn augmented_ratio(&self) -> f64 {
        if self.items == 0 {
            0.0
        } else {
            self.augmented as f64 / self.items as f64
        }
    }

    /// Accumulate another call's counters into this one.
    pub fn merge(&mut self, other: &Self) {
        self.items += other.items;
        self.augmented += other.augmented;
        self.already_marked += other.already_marked;
        self.exact_matches += other.exact_matches;
        self.below_threshold += other.below_threshold;
        self.chunks_scored += other.chunks_scored;
        self.chunks_skipped += other.chunks_skipped;
        self.elapsed_secs += other.elapsed_secs;
    }
}

impl std::fmt::Display for AugmentStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} examples augmented ({:.1}%), {} exact matches, {} already marked, {:.2}s",
            self.augmented,
            self.items,
            self.augmented_ratio() * 100.0,
            self.exact_matches,
            self.already_marked,
            self.elapsed_secs
        )
    }
}
