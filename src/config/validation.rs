//! Configuration validation for tm-fuzzymatch.

use super::types::{AppConfig, CorpusConfig, FuzzyMatchConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.fuzzymatch.validate());
        errors.extend(self.corpus.validate());
        errors
    }
}

impl Validatable for FuzzyMatchConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !(0.0..=1.0).contains(&self.fuzzy_corpus_ratio) {
            errors.push(ConfigError {
                field: "fuzzymatch.fuzzy_corpus_ratio".to_string(),
                message: format!(
                    "Ratio must be between 0.0 and 1.0, got {}",
                    self.fuzzy_corpus_ratio
                ),
            });
        }

        if !(0.0..=100.0).contains(&self.fuzzy_threshold) {
            errors.push(ConfigError {
                field: "fuzzymatch.fuzzy_threshold".to_string(),
                message: format!(
                    "Threshold must be between 0 and 100, got {}",
                    self.fuzzy_threshold
                ),
            });
        }

        if self.tm_delimiter.is_empty() {
            errors.push(ConfigError {
                field: "fuzzymatch.tm_delimiter".to_string(),
                message: "Delimiter must not be empty".to_string(),
            });
        }

        if self.fuzzy_token.is_empty() {
            errors.push(ConfigError {
                field: "fuzzymatch.fuzzy_token".to_string(),
                message: "Fuzzy token must not be empty".to_string(),
            });
        }

        if self.min_length > self.max_length {
            errors.push(ConfigError {
                field: "fuzzymatch.min_length".to_string(),
                message: format!(
                    "min_length ({}) must not exceed max_length ({})",
                    self.min_length, self.max_length
                ),
            });
        }

        if self.chunk_size == 0 {
            errors.push(ConfigError {
                field: "fuzzymatch.chunk_size".to_string(),
                message: "Chunk size must be at least 1".to_string(),
            });
        }

        if let Err(e) = self.scoring_workers() {
            errors.push(ConfigError {
                field: "fuzzymatch.workers".to_string(),
                message: e.to_string(),
            });
        }

        errors
    }
}

impl Validatable for CorpusConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.batch_size == 0 {
            errors.push(ConfigError {
                field: "corpus.batch_size".to_string(),
                message: "Batch size must be at least 1".to_string(),
            });
        }
        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
