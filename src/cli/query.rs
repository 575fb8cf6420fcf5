//! Query command handler.
//!
//! Implements the `query` subcommand: score one segment against the
//! translation memory and show the candidate the augmenter would pick.

use crate::augment::FuzzyMatch;
use crate::config::FuzzyMatchConfig;
use crate::pipeline::{build_transform, write_output, OutputTarget};
use anyhow::{Context, Result};
use serde::Serialize;

/// What the augmenter would do with one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryOutput {
    /// The queried segment
    pub segment: String,
    /// Best TM candidate at or above the threshold, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<Candidate>,
    /// Segment as it would be augmented (quota permitting)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub augmented: Option<String>,
    /// Why the segment would be left alone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

/// A TM unit chosen for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub index: usize,
    pub score: u8,
    pub source: String,
    pub target: String,
}

impl QueryOutput {
    /// Describe the decision for `segment` given its best candidate.
    #[must_use]
    pub fn new(segment: &str, token: &str, best: Option<FuzzyMatch>) -> Self {
        let (augmented, skipped) = if segment.contains(token) {
            (None, Some("segment already carries the fuzzy token".to_string()))
        } else {
            match &best {
                None => (None, Some("no candidate at or above the threshold".to_string())),
                Some(m) if m.is_exact() => (None, Some("exact match".to_string())),
                Some(m) => (Some(format!("{segment}{token}{}", m.target)), None),
            }
        };

        Self {
            segment: segment.to_string(),
            candidate: best.map(|m| Candidate {
                index: m.index,
                score: m.score,
                source: m.source,
                target: m.target,
            }),
            augmented,
            skipped,
        }
    }

    /// Human-readable rendering.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Segment:   {}", self.segment)];
        match &self.candidate {
            Some(c) => {
                lines.push(format!("Candidate: #{} ({}%)", c.index, c.score));
                lines.push(format!("  source:  {}", c.source));
                lines.push(format!("  target:  {}", c.target));
            }
            None => lines.push("Candidate: none".to_string()),
        }
        if let Some(augmented) = &self.augmented {
            lines.push(format!("Augmented: {augmented}"));
        }
        if let Some(reason) = &self.skipped {
            lines.push(format!("Skipped:   {reason}"));
        }
        lines.join("\n")
    }
}

/// Run the query command
#[allow(clippy::needless_pass_by_value)]
pub fn run_query(config: FuzzyMatchConfig, segment: String, json: bool, quiet: bool) -> Result<()> {
    let transform = build_transform(&config, quiet)?;
    let augmenter = transform
        .augmenter()
        .context("transform has no augmenter after warm-up")?;

    let best = augmenter.best_match(&segment)?;
    let output = QueryOutput::new(&segment, &config.fuzzy_token, best);

    let content = if json {
        serde_json::to_string_pretty(&output).context("Failed to serialize query result")?
    } else {
        output.summary()
    };
    write_output(&content, &OutputTarget::Stdout, quiet)
}
