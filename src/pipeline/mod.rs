//! Pipeline orchestration for corpus augmentation.
//!
//! This module provides the shared read → warm up → augment → write
//! workflow used by the CLI command handlers.

mod corpus;
mod output;
mod stage;

pub use corpus::{format_example, parse_corpus_line, read_corpus, CorpusBatches};
pub use output::{write_output, OutputTarget};
pub use stage::{apply_batch, augment_corpus, augment_examples, build_transform};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A corpus line could not be parsed
    #[error("Malformed corpus line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    /// The transform could not be prepared
    #[error("Warm-up failed: {source}")]
    WarmUpFailed {
        #[source]
        source: crate::error::FuzzyMatchError,
    },

    /// A batch failed to augment
    #[error("Augmentation failed for batch starting at example {offset}: {source}")]
    AugmentFailed {
        offset: usize,
        #[source]
        source: crate::error::FuzzyMatchError,
    },
}

/// Exit codes for CLI integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// An error occurred
    pub const ERROR: i32 = 1;
}
