//! Augment command handler.
//!
//! Implements the `augment` subcommand: stream a corpus through the fuzzy
//! match transform and write the augmented corpus.

use crate::config::{AppConfig, Validatable};
use crate::pipeline::{augment_corpus, build_transform, write_output, OutputTarget};
use anyhow::{bail, Context, Result};
use std::io::BufRead;
use std::path::PathBuf;

/// Run the augment command
#[allow(clippy::needless_pass_by_value)]
pub fn run_augment(
    config: AppConfig,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    stats_json: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }

    let transform = build_transform(&config.fuzzymatch, quiet)?;

    let reader: Box<dyn BufRead> = match &input {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open corpus {}", path.display()))?;
            Box::new(std::io::BufReader::new(file))
        }
        None => Box::new(std::io::stdin().lock()),
    };

    let target = OutputTarget::from_option(output);
    let mut writer = target.open()?;
    let stats = augment_corpus(&transform, reader, &mut *writer, &config.corpus)?;
    drop(writer);

    if !quiet {
        tracing::info!("{stats}");
    }

    if let Some(path) = stats_json {
        let json = serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?;
        write_output(&json, &OutputTarget::File(path), quiet)?;
    }

    Ok(())
}
