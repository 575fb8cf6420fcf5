//! Configuration module for tm-fuzzymatch.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.tm-fuzzymatch.yaml` file in your working directory or
//! `~/.config/tm-fuzzymatch/`:
//!
//! ```yaml
//! fuzzymatch:
//!   tm_path: data/tm.tsv
//!   fuzzy_corpus_ratio: 0.1
//!   fuzzy_threshold: 70
//!   min_length: 4
//!   max_length: 70
//! corpus:
//!   batch_size: 50000
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_BATCH_SIZE, DEFAULT_CHUNK_SIZE, DEFAULT_FUZZY_RATIO, DEFAULT_FUZZY_THRESHOLD,
    DEFAULT_FUZZY_TOKEN, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, DEFAULT_TM_DELIMITER,
    DEFAULT_WORKERS,
};
pub use types::{AppConfig, CorpusConfig, FuzzyMatchConfig, FuzzyMatchConfigBuilder};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError, ConfigOverrides,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it for validation and autocompletion of
/// `.tm-fuzzymatch.yaml` files.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
