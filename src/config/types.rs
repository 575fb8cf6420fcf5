//! Configuration types for tm-fuzzymatch.

use super::defaults::{
    DEFAULT_BATCH_SIZE, DEFAULT_CHUNK_SIZE, DEFAULT_FUZZY_RATIO, DEFAULT_FUZZY_THRESHOLD,
    DEFAULT_FUZZY_TOKEN, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, DEFAULT_TM_DELIMITER,
    DEFAULT_WORKERS,
};
use crate::augment::AugmentOptions;
use crate::error::Result;
use crate::matching::{ScoringMethod, Workers};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loadable from YAML and overridable from the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Fuzzy match transform settings
    pub fuzzymatch: FuzzyMatchConfig,
    /// Corpus processing settings
    pub corpus: CorpusConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Fuzzy Match Configuration
// ============================================================================

/// Settings of the fuzzy match transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FuzzyMatchConfig {
    /// Path to a flat text translation memory (required to activate)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tm_path: Option<PathBuf>,
    /// Upper bound on the share of each batch that gets a fuzzy match (0-1)
    pub fuzzy_corpus_ratio: f64,
    /// Similarity threshold (0-100) for a TM unit to count as a fuzzy match
    pub fuzzy_threshold: f64,
    /// Separator between source and target in the TM file
    pub tm_delimiter: String,
    /// Marker inserted between a segment and its matched target
    pub fuzzy_token: String,
    /// Minimum length, in characters, of TM sources and examples
    pub min_length: usize,
    /// Maximum length, in characters, of TM sources and examples
    pub max_length: usize,
    /// Segments scored per scorer call; bounds peak memory
    pub chunk_size: usize,
    /// Scoring threads: -1 for all cores, otherwise an explicit count
    pub workers: i32,
    /// Similarity metric
    pub scoring: ScoringMethod,
}

impl Default for FuzzyMatchConfig {
    fn default() -> Self {
        Self {
            tm_path: None,
            fuzzy_corpus_ratio: DEFAULT_FUZZY_RATIO,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            tm_delimiter: DEFAULT_TM_DELIMITER.to_string(),
            fuzzy_token: DEFAULT_FUZZY_TOKEN.to_string(),
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: DEFAULT_WORKERS,
            scoring: ScoringMethod::default(),
        }
    }
}

impl FuzzyMatchConfig {
    /// Create a `FuzzyMatchConfig` builder.
    pub fn builder() -> FuzzyMatchConfigBuilder {
        FuzzyMatchConfigBuilder::default()
    }

    /// Options for the batch augmenter.
    #[must_use]
    pub fn augment_options(&self) -> AugmentOptions {
        AugmentOptions {
            threshold: self.fuzzy_threshold,
            ratio: self.fuzzy_corpus_ratio,
            token: self.fuzzy_token.clone(),
            chunk_size: self.chunk_size,
        }
    }

    /// Worker setting for the scorer.
    pub fn scoring_workers(&self) -> Result<Workers> {
        Workers::from_config(self.workers)
    }

    /// Whether an example of `len` characters is eligible for matching.
    ///
    /// Both bounds are exclusive.
    #[must_use]
    pub const fn accepts_example_len(&self, len: usize) -> bool {
        len > self.min_length && len < self.max_length
    }
}

// ============================================================================
// Builder for FuzzyMatchConfig
// ============================================================================

/// Builder for constructing `FuzzyMatchConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct FuzzyMatchConfigBuilder {
    config: FuzzyMatchConfig,
}

impl FuzzyMatchConfigBuilder {
    /// Set the translation memory path.
    pub fn tm_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.tm_path = Some(path.into());
        self
    }

    /// Set the augmentation ratio.
    pub const fn ratio(mut self, ratio: f64) -> Self {
        self.config.fuzzy_corpus_ratio = ratio;
        self
    }

    /// Set the similarity threshold.
    pub const fn threshold(mut self, threshold: f64) -> Self {
        self.config.fuzzy_threshold = threshold;
        self
    }

    /// Set the TM delimiter.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.config.tm_delimiter = delimiter.into();
        self
    }

    /// Set the fuzzy marker token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.fuzzy_token = token.into();
        self
    }

    /// Set the length bounds.
    pub const fn length_bounds(mut self, min_length: usize, max_length: usize) -> Self {
        self.config.min_length = min_length;
        self.config.max_length = max_length;
        self
    }

    /// Set the scoring chunk size.
    pub const fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Set the scoring worker count (-1 for all cores).
    pub const fn workers(mut self, workers: i32) -> Self {
        self.config.workers = workers;
        self
    }

    /// Set the similarity metric.
    pub const fn scoring(mut self, scoring: ScoringMethod) -> Self {
        self.config.scoring = scoring;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> FuzzyMatchConfig {
        self.config
    }
}

// ============================================================================
// Corpus Configuration
// ============================================================================

/// How corpus files are read and batched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CorpusConfig {
    /// Examples handed to the transform per batch; the quota applies per batch
    pub batch_size: usize,
    /// Corpus lines are `source<TAB>target` pairs rather than bare sources
    pub with_targets: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            with_targets: false,
        }
    }
}
