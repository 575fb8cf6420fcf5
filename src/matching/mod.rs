//! Similarity scoring between query segments and translation memory sources.
//!
//! # Architecture
//!
//! The augmentation algorithm is written against the [`SimilarityScorer`]
//! trait, which scores a whole list of queries against a whole corpus in
//! one call and returns a [`ScoreMatrix`]:
//!
//! - [`RatioScorer`]: edit-distance ratios computed in parallel (default)
//! - [`string_similarity`]: the underlying pairwise ratio functions
//!
//! # Example
//!
//! ```ignore
//! use tm_fuzzymatch::matching::{RatioScorer, ScoringMethod, SimilarityScorer, Workers};
//!
//! let scorer = RatioScorer::new(ScoringMethod::Indel, Workers::Count(4))?;
//! let matrix = scorer.score(&queries, tm.sources(), 70.0)?;
//! if let Some((idx, score)) = matrix.best(0) {
//!     println!("best TM unit {idx} at {score}%");
//! }
//! ```

mod scorer;
pub mod string_similarity;
mod traits;

pub use scorer::{RatioScorer, ScoringMethod, Workers};
pub use traits::{ScoreMatrix, SimilarityScorer};

/// Score reported for an identical segment.
pub const EXACT_MATCH_SCORE: u8 = 100;
