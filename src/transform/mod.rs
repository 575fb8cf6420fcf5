//! Training-pipeline transforms.
//!
//! A [`Transform`] goes through a fixed lifecycle: its special tokens are
//! registered with the vocabulary, it is warmed up once, and then it is
//! handed examples one at a time ([`Transform::apply`]) or in batches
//! ([`Transform::batch_apply`]).

mod fuzzymatch;

pub use fuzzymatch::FuzzyMatchTransform;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A tokenized training example.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Source-side tokens
    pub src: Vec<String>,
    /// Target-side tokens, if the corpus is parallel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tgt: Option<Vec<String>>,
}

impl Example {
    /// Build an example by splitting a source line on whitespace.
    pub fn from_source(line: &str) -> Self {
        Self {
            src: line.split_whitespace().map(str::to_string).collect(),
            tgt: None,
        }
    }

    /// Build a parallel example from source and target lines.
    pub fn from_pair(source: &str, target: &str) -> Self {
        Self {
            src: source.split_whitespace().map(str::to_string).collect(),
            tgt: Some(target.split_whitespace().map(str::to_string).collect()),
        }
    }

    /// Source tokens joined by single spaces.
    #[must_use]
    pub fn source_text(&self) -> String {
        self.src.join(" ")
    }
}

/// Lifecycle hooks a training pipeline drives.
pub trait Transform: Send + Sync {
    /// Registry name of the transform.
    fn name(&self) -> &'static str;

    /// Special tokens to add to the `(source, target)` vocabularies.
    fn specials(&self) -> (Vec<String>, Vec<String>) {
        (Vec::new(), Vec::new())
    }

    /// Prepare expensive state. Called once before any example is seen.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }

    /// Transform a single example.
    fn apply(&self, example: Example) -> Example {
        example
    }

    /// Transform a batch, keeping one output per input in the same order.
    fn batch_apply(&self, batch: Vec<Example>) -> Result<Vec<Example>>;
}
