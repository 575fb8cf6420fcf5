//! Scoring abstractions.
//!
//! The augmentation algorithm only depends on [`SimilarityScorer`], so the
//! scoring backend can be swapped for a deterministic stub in tests.

use crate::error::{FuzzyMatchError, Result};

/// Dense query × corpus matrix of whole-percentage scores.
///
/// A score of 0 means "below cutoff" and is never selected as a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    scores: Vec<u8>,
}

impl ScoreMatrix {
    /// Create a matrix from row-major scores.
    pub fn new(rows: usize, cols: usize, scores: Vec<u8>) -> Result<Self> {
        if scores.len() != rows * cols {
            return Err(FuzzyMatchError::invariant(format!(
                "score matrix of {rows}x{cols} built from {} scores",
                scores.len()
            )));
        }
        Ok(Self { rows, cols, scores })
    }

    /// Create a matrix from one vector per query.
    pub fn from_rows(rows: Vec<Vec<u8>>, cols: usize) -> Result<Self> {
        let n_rows = rows.len();
        let mut scores = Vec::with_capacity(n_rows * cols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(FuzzyMatchError::invariant(format!(
                    "score row {idx} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            scores.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols,
            scores,
        })
    }

    /// Number of queries.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of corpus entries.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Scores for one query, or `None` if `row` is out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.scores.get(start..start + self.cols)
    }

    /// Score of `queries[row]` against `corpus[col]`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if col >= self.cols {
            return None;
        }
        self.row(row).map(|r| r[col])
    }

    /// Best-scoring corpus index for a query.
    ///
    /// Ties go to the lowest index. Returns `None` for an empty corpus.
    #[must_use]
    pub fn best(&self, row: usize) -> Option<(usize, u8)> {
        let scores = self.row(row)?;
        let mut best: Option<(usize, u8)> = None;
        for (idx, &score) in scores.iter().enumerate() {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((idx, score)),
            }
        }
        best
    }
}

/// A capability that scores many queries against a reference corpus.
///
/// Implementations must be deterministic: identical inputs always produce
/// identical matrices. Any internal parallelism is invisible to callers.
///
/// ```ignore
/// use tm_fuzzymatch::matching::{RatioScorer, SimilarityScorer};
///
/// let scorer = RatioScorer::default();
/// let matrix = scorer.score(&queries, tm.sources(), 70.0)?;
/// ```
pub trait SimilarityScorer: Send + Sync {
    /// Score every query against every corpus entry.
    ///
    /// `matrix[i][j]` is in `[0, 100]`; raw scores below `cutoff` are 0.
    fn score(&self, queries: &[String], corpus: &[String], cutoff: f64) -> Result<ScoreMatrix>;

    /// Get the name of this scorer for logging/debugging.
    fn name(&self) -> &'static str {
        "SimilarityScorer"
    }
}
