//! Parallel ratio scorer.
//!
//! Rows of the score matrix are independent, so they are computed with
//! rayon. The matrix layout does not depend on scheduling, which keeps the
//! output deterministic for a given input.

use super::string_similarity::{indel_ratio, jaro_winkler_ratio, levenshtein_ratio, quantize};
use super::traits::{ScoreMatrix, SimilarityScorer};
use crate::error::{FuzzyMatchError, Result};
use clap::ValueEnum;
use rapidfuzz::fuzz::RatioBatchComparator;
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// String similarity metric used to compare segments.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMethod {
    /// Normalized InDel ratio (insertions and deletions only)
    #[default]
    Indel,
    /// Normalized Levenshtein similarity
    Levenshtein,
    /// Jaro-Winkler similarity
    JaroWinkler,
}

impl std::fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Indel => write!(f, "indel"),
            Self::Levenshtein => write!(f, "levenshtein"),
            Self::JaroWinkler => write!(f, "jaro-winkler"),
        }
    }
}

/// How many threads the scorer may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Workers {
    /// Use rayon's global pool (all available cores)
    #[default]
    All,
    /// Use a dedicated pool of exactly this many threads
    Count(usize),
}

impl Workers {
    /// Sentinel accepted in configuration for "all available".
    pub const ALL_SENTINEL: i32 = -1;

    /// Convert a configured worker count.
    ///
    /// `-1` selects all cores; any other value must be at least 1.
    pub fn from_config(workers: i32) -> Result<Self> {
        match workers {
            Self::ALL_SENTINEL => Ok(Self::All),
            n if n >= 1 => Ok(Self::Count(n as usize)),
            n => Err(FuzzyMatchError::config(format!(
                "workers must be -1 (all cores) or at least 1, got {n}"
            ))),
        }
    }
}

/// Scores query/corpus pairs with a [`ScoringMethod`], in parallel.
pub struct RatioScorer {
    method: ScoringMethod,
    pool: Option<rayon::ThreadPool>,
    sequential: bool,
}

impl Default for RatioScorer {
    fn default() -> Self {
        Self {
            method: ScoringMethod::default(),
            pool: None,
            sequential: false,
        }
    }
}

impl std::fmt::Debug for RatioScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatioScorer")
            .field("method", &self.method)
            .field(
                "threads",
                &self.pool.as_ref().map(rayon::ThreadPool::current_num_threads),
            )
            .field("sequential", &self.sequential)
            .finish()
    }
}

impl RatioScorer {
    /// Create a scorer with the given metric and worker setting.
    pub fn new(method: ScoringMethod, workers: Workers) -> Result<Self> {
        let (pool, sequential) = match workers {
            Workers::All => (None, false),
            Workers::Count(1) => (None, true),
            Workers::Count(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("fuzzymatch-score-{i}"))
                    .build()
                    .map_err(|e| {
                        FuzzyMatchError::config(format!("failed to build scoring pool: {e}"))
                    })?;
                (Some(pool), false)
            }
        };
        Ok(Self {
            method,
            pool,
            sequential,
        })
    }

    /// The metric this scorer applies.
    #[must_use]
    pub const fn method(&self) -> ScoringMethod {
        self.method
    }

    /// Score a single pair, unquantized.
    #[must_use]
    pub fn ratio(&self, a: &str, b: &str) -> f64 {
        match self.method {
            ScoringMethod::Indel => indel_ratio(a, b),
            ScoringMethod::Levenshtein => levenshtein_ratio(a, b),
            ScoringMethod::JaroWinkler => jaro_winkler_ratio(a, b),
        }
    }

    fn score_rows(&self, queries: &[String], corpus: &[String], cutoff: f64) -> Vec<Vec<u8>> {
        match self.method {
            ScoringMethod::Indel => {
                // The comparator caches the query across all TM sources
                let row = |query: &String| {
                    let cached = RatioBatchComparator::new(query.chars());
                    corpus
                        .iter()
                        .map(|entry| quantize(cached.similarity(entry.chars()) * 100.0, cutoff))
                        .collect::<Vec<u8>>()
                };
                self.map_rows(queries, row)
            }
            _ => {
                let row = |query: &String| {
                    corpus
                        .iter()
                        .map(|entry| quantize(self.ratio(query, entry), cutoff))
                        .collect::<Vec<u8>>()
                };
                self.map_rows(queries, row)
            }
        }
    }

    fn map_rows<F>(&self, queries: &[String], row: F) -> Vec<Vec<u8>>
    where
        F: Fn(&String) -> Vec<u8> + Sync + Send,
    {
        if self.sequential {
            return queries.iter().map(row).collect();
        }
        match &self.pool {
            Some(pool) => pool.install(|| queries.par_iter().map(&row).collect()),
            None => queries.par_iter().map(&row).collect(),
        }
    }
}

impl SimilarityScorer for RatioScorer {
    fn score(&self, queries: &[String], corpus: &[String], cutoff: f64) -> Result<ScoreMatrix> {
        let rows = self.score_rows(queries, corpus, cutoff);
        ScoreMatrix::from_rows(rows, corpus.len())
    }

    fn name(&self) -> &'static str {
        "RatioScorer"
    }
}
