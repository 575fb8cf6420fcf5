//! Unified error types for tm-fuzzymatch.
//!
//! Every failure in this crate is fatal to the calling context: a broken
//! translation memory aborts warm-up and an internal consistency failure
//! aborts the batch. Nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tm-fuzzymatch operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FuzzyMatchError {
    /// The translation memory file is missing or unreadable
    #[error("Failed to load translation memory {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A translation memory line is not a `source<delim>target` pair
    #[error("Malformed translation memory {path:?} at line {line}: {reason}")]
    Format {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Internal consistency check failed (e.g. misaligned batch output)
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The batch entry point was used before the translation memory was loaded
    #[error("Fuzzy matcher is not warmed up: call warm_up() before batch_apply()")]
    NotWarmedUp,
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for tm-fuzzymatch operations
pub type Result<T> = std::result::Result<T, FuzzyMatchError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl FuzzyMatchError {
    /// Create a load error for an unreadable translation memory
    pub fn load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Load {
            path: path.into(),
            source,
        }
    }

    /// Create a format error for a malformed translation memory line
    pub fn format(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create an invariant violation
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context is only attached to the message-carrying variants; structured
/// variants (`Load`, `Format`) already name the file and line.
///
/// ```ignore
/// use tm_fuzzymatch::error::ErrorContext;
///
/// let tm = TranslationMemory::load(path, "\t", 4, 70)
///     .context("warming up fuzzymatch transform")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<FuzzyMatchError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: FuzzyMatchError, new_ctx: &str) -> FuzzyMatchError {
    match err {
        FuzzyMatchError::Format { path, line, reason } => FuzzyMatchError::Format {
            path,
            line,
            reason: chain_context(new_ctx, &reason),
        },
        FuzzyMatchError::Invariant(msg) => {
            FuzzyMatchError::Invariant(chain_context(new_ctx, &msg))
        }
        FuzzyMatchError::Config(msg) => FuzzyMatchError::Config(chain_context(new_ctx, &msg)),
        other => other,
    }
}

/// Returns "`new`: `existing`", or just `new` when nothing exists yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FuzzyMatchError::format("tm.tsv", 3, "expected 2 fields, found 1");
        let display = err.to_string();
        assert!(display.contains("tm.tsv"), "{display}");
        assert!(display.contains("line 3"), "{display}");

        let err = FuzzyMatchError::NotWarmedUp;
        assert!(err.to_string().contains("warm_up"));
    }

    #[test]
    fn test_load_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = FuzzyMatchError::load("/path/to/tm.tsv", io_err);

        assert!(err.to_string().contains("/path/to/tm.tsv"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_context_chaining() {
        fn inner() -> Result<()> {
            Err(FuzzyMatchError::invariant("base"))
        }

        fn outer() -> Result<()> {
            inner().context("middle layer").context("outer layer")
        }

        match outer() {
            Err(FuzzyMatchError::Invariant(msg)) => {
                assert_eq!(msg, "outer layer: middle layer: base");
            }
            other => panic!("Expected Invariant error, got {other:?}"),
        }
    }

    #[test]
    fn test_context_leaves_load_untouched() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let result: Result<()> = Err(FuzzyMatchError::load("tm.tsv", io_err));

        assert!(matches!(
            result.context("warm-up"),
            Err(FuzzyMatchError::Load { .. })
        ));
    }

    #[test]
    fn test_context_prefixes_format_reason() {
        let result: Result<()> = Err(FuzzyMatchError::format("tm.tsv", 7, "empty source"));

        match result.context("warm-up") {
            Err(FuzzyMatchError::Format { path, line, reason }) => {
                assert_eq!(path, PathBuf::from("tm.tsv"));
                assert_eq!(line, 7);
                assert_eq!(reason, "warm-up: empty source");
            }
            other => panic!("Expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(FuzzyMatchError::config("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
