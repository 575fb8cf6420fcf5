//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::matching::ScoringMethod;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".tm-fuzzymatch.yaml",
    ".tm-fuzzymatch.yml",
    "tm-fuzzymatch.yaml",
    "tm-fuzzymatch.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/tm-fuzzymatch/)
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("tm-fuzzymatch")))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from an explicit or discovered file, or return default.
///
/// An explicitly named file must exist and parse. A discovered file that
/// fails to load is skipped with a warning.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        let config = load_config_file(path)?;
        return Ok((config, Some(path.to_path_buf())));
    }

    Ok(discover_config_file(None).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    ))
}

// ============================================================================
// Configuration Merging
// ============================================================================

/// Values given on the command line; `None` keeps the file/default value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub tm_path: Option<PathBuf>,
    pub fuzzy_corpus_ratio: Option<f64>,
    pub fuzzy_threshold: Option<f64>,
    pub tm_delimiter: Option<String>,
    pub fuzzy_token: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub chunk_size: Option<usize>,
    pub workers: Option<i32>,
    pub scoring: Option<ScoringMethod>,
    pub batch_size: Option<usize>,
    pub with_targets: bool,
}

impl AppConfig {
    /// Apply command-line overrides on top of this config.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        let fm = &mut self.fuzzymatch;
        if overrides.tm_path.is_some() {
            fm.tm_path.clone_from(&overrides.tm_path);
        }
        if let Some(ratio) = overrides.fuzzy_corpus_ratio {
            fm.fuzzy_corpus_ratio = ratio;
        }
        if let Some(threshold) = overrides.fuzzy_threshold {
            fm.fuzzy_threshold = threshold;
        }
        if let Some(ref delimiter) = overrides.tm_delimiter {
            fm.tm_delimiter.clone_from(delimiter);
        }
        if let Some(ref token) = overrides.fuzzy_token {
            fm.fuzzy_token.clone_from(token);
        }
        if let Some(min_length) = overrides.min_length {
            fm.min_length = min_length;
        }
        if let Some(max_length) = overrides.max_length {
            fm.max_length = max_length;
        }
        if let Some(chunk_size) = overrides.chunk_size {
            fm.chunk_size = chunk_size;
        }
        if let Some(workers) = overrides.workers {
            fm.workers = workers;
        }
        if let Some(scoring) = overrides.scoring {
            fm.scoring = scoring;
        }

        if let Some(batch_size) = overrides.batch_size {
            self.corpus.batch_size = batch_size;
        }
        if overrides.with_targets {
            self.corpus.with_targets = true;
        }
    }

    /// Load from file and apply CLI overrides.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_or_default(config_path)?;
        config.apply_overrides(overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# tm-fuzzymatch configuration
# Place this file at .tm-fuzzymatch.yaml in your working directory
# or at ~/.config/tm-fuzzymatch/tm-fuzzymatch.yaml.
# CLI arguments always override file settings.

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().expect("temp dir");
        let config_path = tmp.path().join(".tm-fuzzymatch.yaml");
        std::fs::write(&config_path, "fuzzymatch:\n  fuzzy_threshold: 80\n").expect("write");

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().expect("temp dir");
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().expect("temp dir");
        let config_path = tmp.path().join("config.yaml");

        let yaml = r#"
fuzzymatch:
  tm_path: /data/tm.tsv
  fuzzy_corpus_ratio: 0.3
  fuzzy_threshold: 75
  fuzzy_token: "<fz>"
  max_length: 120
  scoring: jaro-winkler
corpus:
  batch_size: 1000
"#;
        std::fs::write(&config_path, yaml).expect("write");

        let config = load_config_file(&config_path).expect("load");
        let fm = &config.fuzzymatch;
        assert_eq!(fm.tm_path, Some(PathBuf::from("/data/tm.tsv")));
        assert_eq!(fm.fuzzy_corpus_ratio, 0.3);
        assert_eq!(fm.fuzzy_threshold, 75.0);
        assert_eq!(fm.fuzzy_token, "<fz>");
        assert_eq!(fm.max_length, 120);
        assert_eq!(fm.min_length, 4, "unset keys keep defaults");
        assert_eq!(fm.scoring, ScoringMethod::JaroWinkler);
        assert_eq!(config.corpus.batch_size, 1000);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_bad_yaml() {
        let tmp = TempDir::new().expect("temp dir");
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "fuzzymatch: [not, a, map]\n").expect("write");

        let result = load_config_file(&config_path);
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = AppConfig::default();
        config.fuzzymatch.fuzzy_token = "<file>".to_string();

        let overrides = ConfigOverrides {
            tm_path: Some(PathBuf::from("cli.tsv")),
            fuzzy_corpus_ratio: Some(0.5),
            batch_size: Some(10),
            with_targets: true,
            ..ConfigOverrides::default()
        };
        config.apply_overrides(&overrides);

        assert_eq!(config.fuzzymatch.tm_path, Some(PathBuf::from("cli.tsv")));
        assert_eq!(config.fuzzymatch.fuzzy_corpus_ratio, 0.5);
        assert_eq!(config.fuzzymatch.fuzzy_token, "<file>");
        assert_eq!(config.corpus.batch_size, 10);
        assert!(config.corpus.with_targets);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("fuzzymatch:"));
        assert!(example.contains("fuzzy_corpus_ratio"));

        // The generated body parses back into the defaults
        let body: String = example
            .lines()
            .filter(|l| !l.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");
        let parsed: AppConfig = serde_yaml::from_str(&body).expect("parse");
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().expect("temp dir");
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "corpus:\n  batch_size: 5\n").expect("write");

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }

    #[test]
    fn test_explicit_config_with_bad_value_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "fuzzymatch:\n  fuzzy_corpus_ratio: \"zero\"\n")
            .expect("write");

        let result =
            AppConfig::from_file_with_overrides(Some(&config_path), &ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_explicit_config_missing_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let missing = tmp.path().join("missing.yaml");

        let result = load_or_default(Some(&missing));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_explicit_config_applies_overrides() {
        let tmp = TempDir::new().expect("temp dir");
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "fuzzymatch:\n  fuzzy_threshold: 85\n").expect("write");

        let overrides = ConfigOverrides {
            fuzzy_corpus_ratio: Some(0.4),
            ..ConfigOverrides::default()
        };
        let (config, loaded_from) =
            AppConfig::from_file_with_overrides(Some(&config_path), &overrides).expect("load");

        assert_eq!(loaded_from, Some(config_path));
        assert_eq!(config.fuzzymatch.fuzzy_threshold, 85.0);
        assert_eq!(config.fuzzymatch.fuzzy_corpus_ratio, 0.4);
    }
}
