//! Fuzzy-match augmentation of source batches.
//!
//! For a bounded share of a batch, each segment that has a similar (but not
//! identical) translation memory source gets the marker token and that
//! unit's target text appended:
//!
//! ```text
//! "hello world"  ->  "hello world｟fuzzy｠bonjour monde"
//! ```
//!
//! Batches are scored in fixed-size chunks so that the score matrix never
//! exceeds `chunk_size × |tm|` entries. The quota is global to the batch:
//! once `batch.len() * ratio` segments are augmented, later chunks are
//! copied through without being scored at all.

mod stats;

pub use stats::AugmentStats;

use crate::config::{DEFAULT_CHUNK_SIZE, DEFAULT_FUZZY_RATIO, DEFAULT_FUZZY_THRESHOLD, DEFAULT_FUZZY_TOKEN};
use crate::error::{FuzzyMatchError, Result};
use crate::matching::{RatioScorer, ScoreMatrix, SimilarityScorer, EXACT_MATCH_SCORE};
use crate::tm::TranslationMemory;
use std::sync::Arc;
use std::time::Instant;

/// Parameters for one augmenter.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentOptions {
    /// Minimum similarity (0-100) for a TM unit to count as a fuzzy match
    pub threshold: f64,
    /// Upper bound on the augmented share of each batch (0-1)
    pub ratio: f64,
    /// Marker inserted between the segment and the matched target
    pub token: String,
    /// Number of segments scored per call to the scorer
    pub chunk_size: usize,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_FUZZY_THRESHOLD,
            ratio: DEFAULT_FUZZY_RATIO,
            token: DEFAULT_FUZZY_TOKEN.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Result of augmenting one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentOutcome {
    /// Augmented segments, aligned with the input batch
    pub segments: Vec<String>,
    /// Counters for this call
    pub stats: AugmentStats,
}

/// Best translation memory candidate for a single segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    /// Index of the unit in the translation memory
    pub index: usize,
    /// Whole-percentage similarity
    pub score: u8,
    /// Source side of the unit
    pub source: String,
    /// Target side of the unit
    pub target: String,
}

impl FuzzyMatch {
    /// Whether the candidate is identical to the query.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.score >= EXACT_MATCH_SCORE
    }
}

/// Augments batches against a read-only translation memory.
///
/// `augment` only borrows `self`, so one augmenter can serve several threads.
#[derive(Clone)]
pub struct BatchAugmenter {
    tm: Arc<TranslationMemory>,
    scorer: Arc<dyn SimilarityScorer>,
    options: AugmentOptions,
}

impl std::fmt::Debug for BatchAugmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchAugmenter")
            .field("tm_size", &self.tm.len())
            .field("scorer", &self.scorer.name())
            .field("options", &self.options)
            .finish()
    }
}

impl BatchAugmenter {
    /// Create an augmenter with an explicit scorer.
    pub fn new(
        tm: impl Into<Arc<TranslationMemory>>,
        scorer: Arc<dyn SimilarityScorer>,
        options: AugmentOptions,
    ) -> Self {
        Self {
            tm: tm.into(),
            scorer,
            options,
        }
    }

    /// Create an augmenter using the default [`RatioScorer`].
    pub fn with_default_scorer(tm: impl Into<Arc<TranslationMemory>>, options: AugmentOptions) -> Self {
        Self::new(tm, Arc::new(RatioScorer::default()), options)
    }

    /// The translation memory matched against.
    #[must_use]
    pub fn tm(&self) -> &TranslationMemory {
        &self.tm
    }

    /// The options this augmenter was built with.
    #[must_use]
    pub const fn options(&self) -> &AugmentOptions {
        &self.options
    }

    /// Maximum number of augmented segments for a batch of `len` items.
    #[must_use]
    pub fn quota(&self, len: usize) -> f64 {
        len as f64 * self.options.ratio
    }

    /// Augment a batch, preserving its length and order.
    ///
    /// Empty strings are scored like any other segment and in practice
    /// never match, which lets callers use `""` to exclude an item.
    pub fn augment(&self, batch: &[String]) -> Result<AugmentOutcome> {
        let start = Instant::now();
        tracing::debug!("Starting fuzzy matching on {} examples", batch.len());

        let cap = self.quota(batch.len());
        let chunk_size = self.options.chunk_size.max(1);
        let mut stats = AugmentStats::new(batch.len());
        let mut segments = Vec::with_capacity(batch.len());

        for chunk in batch.chunks(chunk_size) {
            if stats.augmented as f64 >= cap || self.tm.is_empty() {
                tracing::trace!("Skipping chunk of {} examples", chunk.len());
                segments.extend_from_slice(chunk);
                stats.chunks_skipped += 1;
                continue;
            }
            self.augment_chunk(chunk, cap, &mut segments, &mut stats)?;
            stats.chunks_scored += 1;
        }

        if segments.len() != batch.len() {
            return Err(FuzzyMatchError::invariant(format!(
                "augmented {} segments from a batch of {}",
                segments.len(),
                batch.len()
            )));
        }

        stats.elapsed_secs = start.elapsed().as_secs_f64();
        tracing::debug!(
            "FuzzyMatch Transform: Added {} fuzzies in {:.3} secs",
            stats.augmented,
            stats.elapsed_secs
        );

        Ok(AugmentOutcome { segments, stats })
    }

    fn augment_chunk(
        &self,
        chunk: &[String],
        cap: f64,
        segments: &mut Vec<String>,
        stats: &mut AugmentStats,
    ) -> Result<()> {
        let token = self.options.token.as_str();
        let matrix = self.score_chunk(chunk)?;
        let mut quota_reached = false;

        for (idx, segment) in chunk.iter().enumerate() {
            if quota_reached {
                segments.push(segment.clone());
                continue;
            }
            // Already augmented by an earlier pass
            if segment.contains(token) {
                stats.already_marked += 1;
                segments.push(segment.clone());
                continue;
            }

            match matrix.best(idx) {
                Some((tm_idx, score)) if meets_threshold(score, self.options.threshold) => {
                    if score >= EXACT_MATCH_SCORE {
                        stats.exact_matches += 1;
                        segments.push(segment.clone());
                    } else if stats.augmented as f64 >= cap {
                        quota_reached = true;
                        segments.push(segment.clone());
                    } else {
                        let target = &self.tm.targets()[tm_idx];
                        segments.push(format!("{segment}{token}{target}"));
                        stats.augmented += 1;
                    }
                }
                _ => {
                    stats.below_threshold += 1;
                    segments.push(segment.clone());
                }
            }
        }
        Ok(())
    }

    fn score_chunk(&self, chunk: &[String]) -> Result<ScoreMatrix> {
        let matrix = self
            .scorer
            .score(chunk, self.tm.sources(), self.options.threshold)?;
        if matrix.rows() != chunk.len() || matrix.cols() != self.tm.len() {
            return Err(FuzzyMatchError::invariant(format!(
                "{} returned a {}x{} matrix for {} queries against {} TM units",
                self.scorer.name(),
                matrix.rows(),
                matrix.cols(),
                chunk.len(),
                self.tm.len()
            )));
        }
        Ok(matrix)
    }

    /// Find the best translation memory candidate for one segment.
    ///
    /// Unlike [`augment`](Self::augment), exact matches are returned; check
    /// [`FuzzyMatch::is_exact`].
    pub fn best_match(&self, segment: &str) -> Result<Option<FuzzyMatch>> {
        let queries = [segment.to_string()];
        let matrix = self.score_chunk(&queries)?;

        Ok(matrix
            .best(0)
            .filter(|&(_, score)| meets_threshold(score, self.options.threshold))
            .and_then(|(index, score)| {
                let (source, target) = self.tm.get(index)?;
                Some(FuzzyMatch {
                    index,
                    score,
                    source: source.to_string(),
                    target: target.to_string(),
                })
            }))
    }
}

/// Scores are whole percentages; compare against the threshold at that
/// resolution. Zero always means "below cutoff".
fn meets_threshold(score: u8, threshold: f64) -> bool {
    score > 0 && f64::from(score) >= threshold.floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tm::TmEntry;

    /// Scores every query against every unit with a fixed value.
    struct FixedScorer(u8);

    impl SimilarityScorer for FixedScorer {
        fn score(&self, queries: &[String], corpus: &[String], _cutoff: f64) -> Result<ScoreMatrix> {
            ScoreMatrix::new(
                queries.len(),
                corpus.len(),
                vec![self.0; queries.len() * corpus.len()],
            )
        }
    }

    /// Counts how many times it was asked to score.
    #[derive(Default)]
    struct CountingScorer {
        calls: std::sync::atomic::AtomicUsize,
    }

    impl SimilarityScorer for CountingScorer {
        fn score(&self, queries: &[String], corpus: &[String], _cutoff: f64) -> Result<ScoreMatrix> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            ScoreMatrix::new(queries.len(), corpus.len(), vec![80; queries.len() * corpus.len()])
        }
    }

    /// Returns a matrix with the wrong number of rows.
    struct BrokenScorer;

    impl SimilarityScorer for BrokenScorer {
        fn score(&self, _queries: &[String], corpus: &[String], _cutoff: f64) -> Result<ScoreMatrix> {
            ScoreMatrix::new(1, corpus.len(), vec![80; corpus.len()])
        }
    }

    fn tm(pairs: &[(&str, &str)]) -> TranslationMemory {
        TranslationMemory::from_entries(pairs.iter().map(|(s, t)| TmEntry::new(*s, *t)))
    }

    fn batch(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn options(ratio: f64) -> AugmentOptions {
        AugmentOptions {
            threshold: 70.0,
            ratio,
            token: "[F]".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    #[test]
    fn test_fuzzy_match_appended() {
        let augmenter = BatchAugmenter::with_default_scorer(
            tm(&[("hello worlX", "bonjour mondeX")]),
            options(1.0),
        );
        let outcome = augmenter.augment(&batch(&["hello world"])).expect("augment");

        assert_eq!(outcome.segments, ["hello world[F]bonjour mondeX"]);
        assert_eq!(outcome.stats.augmented, 1);
    }

    #[test]
    fn test_exact_match_excluded() {
        let augmenter = BatchAugmenter::with_default_scorer(
            tm(&[("hello world", "bonjour monde")]),
            options(1.0),
        );
        let outcome = augmenter.augment(&batch(&["hello world"])).expect("augment");

        assert_eq!(outcome.segments, ["hello world"]);
        assert_eq!(outcome.stats.exact_matches, 1);
        assert_eq!(outcome.stats.augmented, 0);
    }

    #[test]
    fn test_exact_match_shadows_fuzzy_candidate() {
        // Best candidate is exact, so the weaker fuzzy one is not used either
        let augmenter = BatchAugmenter::with_default_scorer(
            tm(&[("hello worlX", "fuzzy"), ("hello world", "exact")]),
            options(1.0),
        );
        let outcome = augmenter.augment(&batch(&["hello world"])).expect("augment");
        assert_eq!(outcome.segments, ["hello world"]);
    }

    #[test]
    fn test_zero_ratio_scores_nothing() {
        let scorer = Arc::new(CountingScorer::default());
        let augmenter = BatchAugmenter::new(tm(&[("abcd", "wxyz")]), scorer.clone(), options(0.0));
        let input = batch(&["a", "b", "c"]);

        let outcome = augmenter.augment(&input).expect("augment");
        assert_eq!(outcome.segments, input);
        assert_eq!(scorer.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
        assert_eq!(outcome.stats.chunks_skipped, 1);
    }

    #[test]
    fn test_marked_segment_untouched_and_uncounted() {
        let augmenter = BatchAugmenter::new(tm(&[("foo bar", "x")]), Arc::new(FixedScorer(90)), options(1.0));
        let outcome = augmenter
            .augment(&batch(&["foo[F]bar", "foo baz"]))
            .expect("augment");

        assert_eq!(outcome.segments, ["foo[F]bar", "foo baz[F]x"]);
        assert_eq!(outcome.stats.already_marked, 1);
        assert_eq!(outcome.stats.augmented, 1);
    }

    #[test]
    fn test_quota_stops_within_chunk() {
        let augmenter = BatchAugmenter::new(tm(&[("unit", "T")]), Arc::new(FixedScorer(80)), options(0.2));
        let input: Vec<String> = (0..10).map(|i| format!("item {i}")).collect();

        let outcome = augmenter.augment(&input).expect("augment");
        assert_eq!(outcome.stats.augmented, 2);
        assert_eq!(outcome.segments[0], "item 0[F]T");
        assert_eq!(outcome.segments[1], "item 1[F]T");
        assert_eq!(&outcome.segments[2..], &input[2..]);
    }

    #[test]
    fn test_quota_is_unrounded() {
        // 3 * 0.5 = 1.5: a second augmentation is still allowed (1 < 1.5)
        let augmenter = BatchAugmenter::new(tm(&[("unit", "T")]), Arc::new(FixedScorer(80)), options(0.5));
        let outcome = augmenter.augment(&batch(&["a", "b", "c"])).expect("augment");
        assert_eq!(outcome.stats.augmented, 2);
    }

    #[test]
    fn test_quota_spans_chunks_and_skips_later_chunks() {
        let scorer = Arc::new(CountingScorer::default());
        let mut opts = options(0.25);
        opts.chunk_size = 2;
        let augmenter = BatchAugmenter::new(tm(&[("unit", "T")]), scorer.clone(), opts);
        let input: Vec<String> = (0..8).map(|i| format!("s{i}")).collect();

        // cap = 2: first chunk fills it, remaining three chunks are never scored
        let outcome = augmenter.augment(&input).expect("augment");
        assert_eq!(outcome.stats.augmented, 2);
        assert_eq!(outcome.stats.chunks_scored, 1);
        assert_eq!(outcome.stats.chunks_skipped, 3);
        assert_eq!(scorer.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(outcome.segments.len(), 8);
    }

    #[test]
    fn test_below_threshold_untouched() {
        let augmenter = BatchAugmenter::new(tm(&[("unit", "T")]), Arc::new(FixedScorer(0)), options(1.0));
        let outcome = augmenter.augment(&batch(&["anything"])).expect("augment");
        assert_eq!(outcome.segments, ["anything"]);
        assert_eq!(outcome.stats.below_threshold, 1);
    }

    #[test]
    fn test_uncut_scores_rechecked_against_threshold() {
        // A scorer that ignores the cutoff still cannot sneak in weak matches
        let augmenter = BatchAugmenter::new(tm(&[("unit", "T")]), Arc::new(FixedScorer(50)), options(1.0));
        let outcome = augmenter.augment(&batch(&["anything"])).expect("augment");
        assert_eq!(outcome.stats.augmented, 0);
    }

    #[test]
    fn test_empty_sentinel_passes_through() {
        let augmenter = BatchAugmenter::with_default_scorer(
            tm(&[("hello worlX", "bonjour")]),
            options(1.0),
        );
        let outcome = augmenter.augment(&batch(&["", "hello world", ""])).expect("augment");
        assert_eq!(outcome.segments, ["", "hello world[F]bonjour", ""]);
    }

    #[test]
    fn test_empty_tm_passes_through() {
        let scorer = Arc::new(CountingScorer::default());
        let augmenter = BatchAugmenter::new(TranslationMemory::new(), scorer.clone(), options(1.0));
        let input = batch(&["hello", "world"]);

        let outcome = augmenter.augment(&input).expect("augment");
        assert_eq!(outcome.segments, input);
        assert_eq!(scorer.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_batch() {
        let augmenter = BatchAugmenter::with_default_scorer(tm(&[("unit", "T")]), options(1.0));
        let outcome = augmenter.augment(&[]).expect("augment");
        assert!(outcome.segments.is_empty());
        assert_eq!(outcome.stats.items, 0);
    }

    #[test]
    fn test_misshapen_matrix_is_invariant_error() {
        let augmenter = BatchAugmenter::new(tm(&[("unit", "T")]), Arc::new(BrokenScorer), options(1.0));
        let err = augmenter.augment(&batch(&["a", "b"])).unwrap_err();
        assert!(matches!(err, FuzzyMatchError::Invariant(_)));
    }

    #[test]
    fn test_best_match_reports_exact() {
        let augmenter = BatchAugmenter::with_default_scorer(
            tm(&[("goodbye", "au revoir"), ("hello world", "bonjour monde")]),
            options(1.0),
        );

        let hit = augmenter.best_match("hello world").expect("score").expect("match");
        assert_eq!(hit.index, 1);
        assert_eq!(hit.target, "bonjour monde");
        assert!(hit.is_exact());

        assert_eq!(augmenter.best_match("zzzzzzzz").expect("score"), None);
    }

    #[test]
    fn test_meets_threshold() {
        assert!(meets_threshold(70, 70.0));
        assert!(meets_threshold(70, 70.4));
        assert!(!meets_threshold(69, 70.0));
        assert!(!meets_threshold(0, 0.0));
    }

    #[test]
    fn test_augment_under_scoped_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        let augmenter = BatchAugmenter::new(
            tm(&[("unit", "T")]),
            Arc::new(FixedScorer(80)),
            AugmentOptions {
                chunk_size: 1,
                ..options(0.5)
            },
        );

        let out = tracing::subscriber::with_default(subscriber, || {
            augmenter.augment(&batch(&["a", "b", "c", "d"]))
        })
        .expect("augment");
        assert_eq!(out.stats.augmented, 2);
        assert_eq!(out.stats.chunks_skipped, 2);
    }
}
