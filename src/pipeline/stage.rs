//! Augmentation stage: warm up the transform and feed it corpus batches.

use super::corpus::{format_example, CorpusBatches};
use super::PipelineError;
use crate::augment::AugmentStats;
use crate::config::{CorpusConfig, FuzzyMatchConfig};
use crate::transform::{Example, FuzzyMatchTransform, Transform};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Build and warm up a fuzzy match transform.
pub fn build_transform(config: &FuzzyMatchConfig, quiet: bool) -> Result<FuzzyMatchTransform> {
    let mut transform = FuzzyMatchTransform::new(config.clone());
    transform
        .warm_up()
        .map_err(|source| PipelineError::WarmUpFailed { source })?;

    if !quiet {
        if let Some(augmenter) = transform.augmenter() {
            tracing::info!("Loaded translation memory with {} units", augmenter.tm().len());
        }
    }
    Ok(transform)
}

/// Augment in-memory examples, `batch_size` at a time.
///
/// The ratio quota applies to each batch separately.
pub fn augment_examples(
    transform: &FuzzyMatchTransform,
    examples: Vec<Example>,
    batch_size: usize,
) -> Result<(Vec<Example>, AugmentStats)> {
    let batch_size = batch_size.max(1);
    let mut total = AugmentStats::default();
    let mut output = Vec::with_capacity(examples.len());
    let mut pending = examples.into_iter().peekable();
    let mut offset = 0;

    while pending.peek().is_some() {
        let batch: Vec<Example> = pending.by_ref().take(batch_size).collect();
        let len = batch.len();
        let (augmented, stats) = transform
            .batch_apply_with_stats(batch)
            .map_err(|source| PipelineError::AugmentFailed { offset, source })?;
        total.merge(&stats);
        output.extend(augmented);
        offset += len;
    }

    Ok((output, total))
}

/// Stream a corpus from `reader` to `writer`, augmenting batch by batch.
pub fn augment_corpus<R: BufRead, W: Write + ?Sized>(
    transform: &FuzzyMatchTransform,
    reader: R,
    writer: &mut W,
    corpus: &CorpusConfig,
) -> Result<AugmentStats> {
    let mut total = AugmentStats::default();
    let mut offset = 0;

    for batch in CorpusBatches::new(reader, corpus.batch_size, corpus.with_targets) {
        let batch = batch?;
        let len = batch.len();
        let (augmented, stats) = transform
            .batch_apply_with_stats(batch)
            .map_err(|source| PipelineError::AugmentFailed { offset, source })?;

        for example in &augmented {
            writeln!(writer, "{}", format_example(example)).context("Failed to write corpus")?;
        }
        tracing::debug!("Batch at {offset}: {stats}");
        total.merge(&stats);
        offset += len;
    }

    writer.flush().context("Failed to flush corpus output")?;
    Ok(total)
}

/// Batch entry point for callers holding a `dyn Transform`.
pub fn apply_batch(transform: &dyn Transform, batch: Vec<Example>) -> Result<Vec<Example>> {
    let expected = batch.len();
    let output = transform
        .batch_apply(batch)
        .with_context(|| format!("{} transform failed", transform.name()))?;
    anyhow::ensure!(
        output.len() == expected,
        "{} transform returned {} examples for {expected}",
        transform.name(),
        output.len()
    );
    Ok(output)
}
