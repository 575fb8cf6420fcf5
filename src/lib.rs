//! **Translation-memory fuzzy match augmentation for training corpora.**
//!
//! `tm-fuzzymatch` prepares training data for neural machine translation
//! models that learn to reuse suggestions from a translation memory (TM).
//! For a bounded share of the segments in a corpus batch it finds the most
//! similar TM source, and when that similarity clears a threshold without
//! being an exact match, it appends a special token followed by the TM
//! target:
//!
//! ```text
//! hello world             ->  hello world｟fuzzy｠bonjour le monde
//! ```
//!
//! ## Core Concepts & Modules
//!
//! - **[`tm`]**: [`TranslationMemory`] loading from delimiter-separated
//!   files, with length filtering of units.
//! - **[`matching`]**: the [`SimilarityScorer`] seam and the default
//!   parallel [`RatioScorer`], producing quantized 0-100 scores.
//! - **[`augment`]**: [`BatchAugmenter`], the chunked augmentation
//!   algorithm with its global quota, idempotence and exact-match rules.
//! - **[`transform`]**: the [`Transform`] contract and
//!   [`FuzzyMatchTransform`], which adapts the augmenter to tokenized
//!   examples.
//! - **[`pipeline`]**: corpus reading, batching and writing.
//! - **[`config`]**: typed, validated configuration with YAML discovery.
//!
//! ## Getting Started
//!
//! ```no_run
//! use tm_fuzzymatch::{FuzzyMatchConfig, FuzzyMatchTransform, Transform, Example};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FuzzyMatchConfig::builder()
//!         .tm_path("data/tm.tsv")
//!         .ratio(0.2)
//!         .build();
//!
//!     let mut transform = FuzzyMatchTransform::new(config);
//!     transform.warm_up()?;
//!
//!     let batch = vec![Example::from_source("the cat sat on the mat")];
//!     for example in transform.batch_apply(batch)? {
//!         println!("{}", example.source_text());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `tm-fuzzymatch` binary wraps the [`pipeline`] for corpus files:
//! `tm-fuzzymatch augment --tm tm.tsv corpus.txt -O out.txt`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: usize/f64 casts appear in quota and ratio math,
    // all values are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::fn_params_excessive_bools,
    // Variable names like `min`/`max` are clear in context
    clippy::similar_names
)]

pub mod augment;
pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod pipeline;
pub mod tm;
pub mod transform;

// Re-export main types for convenience
pub use augment::{AugmentOptions, AugmentOutcome, AugmentStats, BatchAugmenter, FuzzyMatch};
pub use config::{AppConfig, CorpusConfig, FuzzyMatchConfig, FuzzyMatchConfigBuilder};
pub use config::{ConfigError, Validatable};
pub use error::{ErrorContext, FuzzyMatchError, Result};
pub use matching::{RatioScorer, ScoreMatrix, ScoringMethod, SimilarityScorer, Workers};
pub use tm::{TmEntry, TranslationMemory};
pub use transform::{Example, FuzzyMatchTransform, Transform};
