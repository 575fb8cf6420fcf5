//! Fuzzy match transform for Neural Fuzzy Repair.
//!
//! Augments a share of source examples with the target side of a similar
//! translation memory unit, behind a marker token the model learns to
//! treat as "repair hint follows".

use super::{Example, Transform};
use crate::augment::{AugmentStats, BatchAugmenter};
use crate::config::{FuzzyMatchConfig, Validatable};
use crate::error::{ErrorContext, FuzzyMatchError, Result};
use crate::matching::RatioScorer;
use crate::tm::TranslationMemory;
use std::sync::Arc;

/// Pipeline adapter around [`BatchAugmenter`].
#[derive(Debug)]
pub struct FuzzyMatchTransform {
    config: FuzzyMatchConfig,
    augmenter: Option<BatchAugmenter>,
}

impl FuzzyMatchTransform {
    /// Create a transform; the TM is loaded by [`Transform::warm_up`].
    #[must_use]
    pub const fn new(config: FuzzyMatchConfig) -> Self {
        Self {
            config,
            augmenter: None,
        }
    }

    /// Create an already warmed-up transform around an existing augmenter.
    ///
    /// Threshold, ratio, token and chunk size are taken from the augmenter's
    /// options and overwrite those in `config`; the length bounds and TM
    /// settings still come from `config`.
    #[must_use]
    pub fn from_parts(mut config: FuzzyMatchConfig, augmenter: BatchAugmenter) -> Self {
        let options = augmenter.options();
        config.fuzzy_threshold = options.threshold;
        config.fuzzy_corpus_ratio = options.ratio;
        config.fuzzy_token.clone_from(&options.token);
        config.chunk_size = options.chunk_size;
        Self {
            config,
            augmenter: Some(augmenter),
        }
    }

    /// Special tokens a config registers, without building the transform.
    #[must_use]
    pub fn specials_for(config: &FuzzyMatchConfig) -> (Vec<String>, Vec<String>) {
        (vec![config.fuzzy_token.clone()], Vec::new())
    }

    /// The transform's configuration.
    #[must_use]
    pub const fn config(&self) -> &FuzzyMatchConfig {
        &self.config
    }

    /// The augmenter, once warmed up.
    #[must_use]
    pub const fn augmenter(&self) -> Option<&BatchAugmenter> {
        self.augmenter.as_ref()
    }

    /// Whether [`Transform::warm_up`] has completed.
    #[must_use]
    pub const fn is_warmed_up(&self) -> bool {
        self.augmenter.is_some()
    }

    /// Augment a batch and report what happened.
    pub fn batch_apply_with_stats(
        &self,
        mut batch: Vec<Example>,
    ) -> Result<(Vec<Example>, AugmentStats)> {
        let augmenter = self.augmenter.as_ref().ok_or(FuzzyMatchError::NotWarmedUp)?;

        // Out-of-range examples become "" so they can never match
        let segments: Vec<String> = batch
            .iter()
            .map(|example| {
                let joined = example.source_text();
                if self.config.accepts_example_len(joined.chars().count()) {
                    joined
                } else {
                    String::new()
                }
            })
            .collect();

        let outcome = augmenter.augment(&segments)?;
        if outcome.segments.len() != batch.len() {
            return Err(FuzzyMatchError::invariant(format!(
                "{} augmented segments for {} examples",
                outcome.segments.len(),
                batch.len()
            )));
        }

        for ((example, original), augmented) in
            batch.iter_mut().zip(&segments).zip(outcome.segments)
        {
            if !augmented.is_empty() && augmented != *original {
                example.src = augmented.split(' ').map(str::to_string).collect();
            }
        }

        Ok((batch, outcome.stats))
    }
}

impl Transform for FuzzyMatchTransform {
    fn name(&self) -> &'static str {
        "fuzzymatch"
    }

    fn specials(&self) -> (Vec<String>, Vec<String>) {
        Self::specials_for(&self.config)
    }

    fn warm_up(&mut self) -> Result<()> {
        let errors = self.config.validate();
        if !errors.is_empty() {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return Err(FuzzyMatchError::config(messages.join("; ")));
        }

        let tm_path = self
            .config
            .tm_path
            .as_deref()
            .ok_or_else(|| FuzzyMatchError::config("fuzzymatch.tm_path is required"))?;

        let tm = TranslationMemory::load(
            tm_path,
            &self.config.tm_delimiter,
            self.config.min_length,
            self.config.max_length,
        )?;
        let scorer = RatioScorer::new(self.config.scoring, self.config.scoring_workers()?)
            .context("building fuzzymatch scorer")?;

        tracing::debug!(
            "Warmed up {} transform: {} TM units, scorer {:?}",
            self.name(),
            tm.len(),
            scorer
        );
        self.augmenter = Some(BatchAugmenter::new(
            tm,
            Arc::new(scorer),
            self.config.augment_options(),
        ));
        Ok(())
    }

    fn batch_apply(&self, batch: Vec<Example>) -> Result<Vec<Example>> {
        self.batch_apply_with_stats(batch).map(|(batch, _)| batch)
    }
}
