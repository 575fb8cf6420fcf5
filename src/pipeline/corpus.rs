//! Plain-text corpus reading and formatting.
//!
//! One example per line, tokens separated by whitespace. Parallel corpora
//! carry `source<TAB>target` on each line.

use super::PipelineError;
use crate::transform::Example;
use anyhow::{Context, Result};
use std::io::BufRead;
use std::path::Path;

/// Parse one corpus line into an example.
pub fn parse_corpus_line(
    line: &str,
    line_no: usize,
    with_targets: bool,
) -> std::result::Result<Example, PipelineError> {
    if !with_targets {
        return Ok(Example::from_source(line));
    }
    line.split_once('\t')
        .map(|(source, target)| Example::from_pair(source, target))
        .ok_or_else(|| PipelineError::MalformedLine {
            line: line_no,
            reason: "expected source<TAB>target".to_string(),
        })
}

/// Format an example as a corpus line (without the newline).
#[must_use]
pub fn format_example(example: &Example) -> String {
    match &example.tgt {
        Some(tgt) => format!("{}\t{}", example.source_text(), tgt.join(" ")),
        None => example.source_text(),
    }
}

/// Read a whole corpus file into memory.
pub fn read_corpus(path: &Path, with_targets: bool) -> Result<Vec<Example>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open corpus {}", path.display()))?;
    let mut examples = Vec::new();
    for batch in CorpusBatches::new(std::io::BufReader::new(file), usize::MAX, with_targets) {
        examples.extend(batch.with_context(|| format!("Failed to read corpus {}", path.display()))?);
    }
    Ok(examples)
}

/// Iterator over fixed-size batches of examples read from a corpus.
///
/// Only one batch is held in memory at a time.
pub struct CorpusBatches<R> {
    lines: std::iter::Enumerate<std::io::Lines<R>>,
    batch_size: usize,
    with_targets: bool,
    done: bool,
}

impl<R: BufRead> CorpusBatches<R> {
    /// Create a batch iterator; a `batch_size` of 0 is treated as 1.
    pub fn new(reader: R, batch_size: usize, with_targets: bool) -> Self {
        Self {
            lines: reader.lines().enumerate(),
            batch_size: batch_size.max(1),
            with_targets,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for CorpusBatches<R> {
    type Item = Result<Vec<Example>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut batch = Vec::new();
        while batch.len() < self.batch_size {
            let Some((idx, line)) = self.lines.next() else {
                self.done = true;
                break;
            };
            let parsed = line
                .context("Failed to read corpus line")
                .and_then(|line| {
                    parse_corpus_line(&line, idx + 1, self.with_targets).map_err(anyhow::Error::from)
                });
            match parsed {
                Ok(example) => batch.push(example),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        if batch.is_empty() {
            None
        } else {
            Some(Ok(batch))
        }
    }
}
