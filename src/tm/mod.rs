//! Translation memory loading and filtering.
//!
//! A translation memory (TM) is a flat UTF-8 text file with one unit per
//! line, the source and target text separated by a delimiter (a tab by
//! default). Loading produces two index-aligned sequences so that the
//! source list can be handed to the scorer in one piece.
//!
//! ```ignore
//! use tm_fuzzymatch::tm::TranslationMemory;
//!
//! let tm = TranslationMemory::load("tm.tsv".as_ref(), "\t", 4, 70)?;
//! println!("{} units", tm.len());
//! ```

use crate::error::{FuzzyMatchError, Result};
use std::io::BufRead;
use std::path::Path;

/// A single translation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmEntry {
    /// Source-language text
    pub source: String,
    /// Target-language text
    pub target: String,
}

impl TmEntry {
    /// Create a new translation unit
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Index-aligned source and target sequences.
///
/// `sources()[i]` is the source side of `targets()[i]`. The memory is
/// immutable once built; share it behind an `Arc` for concurrent readers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMemory {
    sources: Vec<String>,
    targets: Vec<String>,
}

impl TranslationMemory {
    /// Create an empty translation memory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a translation memory from already-filtered entries.
    ///
    /// No length filtering or trimming is applied.
    pub fn from_entries(entries: impl IntoIterator<Item = TmEntry>) -> Self {
        let (sources, targets) = entries
            .into_iter()
            .map(|entry| (entry.source, entry.target))
            .unzip();
        Self { sources, targets }
    }

    /// Load a translation memory file.
    ///
    /// Units whose raw source field has fewer than `min_length` or more
    /// than `max_length` characters are skipped. Any line that does not
    /// hold exactly one `delimiter` aborts the whole load.
    pub fn load(path: &Path, delimiter: &str, min_length: usize, max_length: usize) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| FuzzyMatchError::load(path, e))?;
        let reader = std::io::BufReader::new(file);
        let tm = Self::from_reader(reader, path, delimiter, min_length, max_length)?;

        tracing::debug!(
            "Translation Memory size for FuzzyMatch transform: {}",
            tm.len()
        );
        Ok(tm)
    }

    /// Parse a translation memory from any buffered reader.
    ///
    /// `origin` is only used to label errors.
    pub fn from_reader<R: BufRead>(
        reader: R,
        origin: &Path,
        delimiter: &str,
        min_length: usize,
        max_length: usize,
    ) -> Result<Self> {
        if delimiter.is_empty() {
            return Err(FuzzyMatchError::config("TM delimiter must not be empty"));
        }

        let mut tm = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| FuzzyMatchError::load(origin, e))?;
            let (source, target) = split_unit(&line, delimiter)
                .map_err(|reason| FuzzyMatchError::format(origin, idx + 1, reason))?;

            // Filter on the raw source field, before trimming
            let source_len = source.chars().count();
            if source_len < min_length || source_len > max_length {
                continue;
            }

            tm.sources.push(source.trim().to_string());
            tm.targets.push(target.trim().to_string());
        }

        Ok(tm)
    }

    /// Parse a translation memory held in memory.
    pub fn parse_str(
        content: &str,
        delimiter: &str,
        min_length: usize,
        max_length: usize,
    ) -> Result<Self> {
        Self::from_reader(
            content.as_bytes(),
            Path::new("<memory>"),
            delimiter,
            min_length,
            max_length,
        )
    }

    /// Source segments, aligned with [`targets`](Self::targets).
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Target segments, aligned with [`sources`](Self::sources).
    #[must_use]
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Get the unit at `index` as a `(source, target)` pair.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(&str, &str)> {
        let source = self.sources.get(index)?;
        let target = self.targets.get(index)?;
        Some((source.as_str(), target.as_str()))
    }

    /// Iterate over `(source, target)` pairs in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sources
            .iter()
            .map(String::as_str)
            .zip(self.targets.iter().map(String::as_str))
    }

    /// Number of translation units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the memory holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Split a line into its source and target fields.
fn split_unit<'a>(line: &'a str, delimiter: &str) -> std::result::Result<(&'a str, &'a str), String> {
    let fields = line.matches(delimiter).count() + 1;
    if fields != 2 {
        return Err(format!(
            "expected 2 fields separated by {delimiter:?}, found {fields}"
        ));
    }
    line.split_once(delimiter)
        .ok_or_else(|| format!("missing delimiter {delimiter:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_trims_fields() {
        let tm = TranslationMemory::parse_str(" hello world\tbonjour monde \n", "\t", 4, 70)
            .expect("valid TM");

        assert_eq!(tm.len(), 1);
        assert_eq!(tm.get(0), Some(("hello world", "bonjour monde")));
    }

    #[test]
    fn test_length_filter_uses_raw_source() {
        // "abc " is 4 chars raw but 3 once trimmed
        let content = "abc \tkept\nab\ttoo short\n";
        let tm = TranslationMemory::parse_str(content, "\t", 4, 70).expect("valid TM");

        assert_eq!(tm.sources(), ["abc"]);
        assert_eq!(tm.targets(), ["kept"]);
    }

    #[test]
    fn test_length_filter_bounds_inclusive() {
        let content = "abcd\tmin\nabcdefgh\tmax\nabcdefghi\tover\n";
        let tm = TranslationMemory::parse_str(content, "\t", 4, 8).expect("valid TM");

        assert_eq!(tm.sources(), ["abcd", "abcdefgh"]);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 4 characters, 12 bytes
        let content = "日本語だ\tjapanese\n";
        let tm = TranslationMemory::parse_str(content, "\t", 1, 4).expect("valid TM");

        assert_eq!(tm.len(), 1);
    }

    #[test]
    fn test_missing_delimiter_is_format_error() {
        let content = "hello world\tbonjour\nno delimiter here\n";
        let err = TranslationMemory::parse_str(content, "\t", 4, 70).unwrap_err();

        match err {
            FuzzyMatchError::Format { line, .. } => assert_eq!(line, 2),
            other => panic!("Expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_delimiter_is_format_error() {
        let content = "a source\ta target\tstray\n";
        let err = TranslationMemory::parse_str(content, "\t", 4, 70).unwrap_err();

        assert!(matches!(err, FuzzyMatchError::Format { line: 1, .. }));
    }

    #[test]
    fn test_malformed_short_line_still_fails() {
        // Format is checked before the length filter
        let err = TranslationMemory::parse_str("ab\n", "\t", 4, 70).unwrap_err();
        assert!(matches!(err, FuzzyMatchError::Format { .. }));
    }

    #[test]
    fn test_custom_delimiter() {
        let tm = TranslationMemory::parse_str("hello there ||| salut\n", " ||| ", 4, 70)
            .expect("valid TM");

        assert_eq!(tm.get(0), Some(("hello there", "salut")));
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let err = TranslationMemory::parse_str("a\tb\n", "", 0, 70).unwrap_err();
        assert!(matches!(err, FuzzyMatchError::Config(_)));
    }

    #[test]
    fn test_no_deduplication() {
        let content = "same source\tone\nsame source\ttwo\n";
        let tm = TranslationMemory::parse_str(content, "\t", 4, 70).expect("valid TM");

        assert_eq!(tm.len(), 2);
        assert_eq!(tm.targets(), ["one", "two"]);
    }

    #[test]
    fn test_iter_yields_kept_units_in_load_order() {
        let content = "first unit\tun\nxy\tskipped\nsecond unit\tdeux\n";
        let tm = TranslationMemory::parse_str(content, "\t", 4, 70).expect("valid TM");

        let pairs: Vec<(&str, &str)> = tm.iter().collect();
        assert_eq!(pairs, [("first unit", "un"), ("second unit", "deux")]);
        assert_eq!(tm.iter().nth(1), tm.get(1));
    }

    #[test]
    fn test_load_missing_file() {
        let err = TranslationMemory::load(Path::new("/nonexistent/tm.tsv"), "\t", 4, 70)
            .unwrap_err();
        assert!(matches!(err, FuzzyMatchError::Load { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "the cat sat\tle chat était assis").expect("write");
        writeln!(file, "a dog ran\tun chien a couru").expect("write");

        let tm = TranslationMemory::load(file.path(), "\t", 4, 70).expect("load TM");
        assert_eq!(tm.len(), 2);
        assert_eq!(
            tm.iter().collect::<Vec<_>>(),
            vec![
                ("the cat sat", "le chat était assis"),
                ("a dog ran", "un chien a couru")
            ]
        );
    }

    #[test]
    fn test_load_invalid_utf8_is_load_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"caf\xe9 au lait\tcoffee\n").expect("write");

        let err = TranslationMemory::load(file.path(), "\t", 4, 70).unwrap_err();
        assert!(matches!(err, FuzzyMatchError::Load { .. }));
    }

    #[test]
    fn test_from_entries() {
        let tm = TranslationMemory::from_entries(vec![
            TmEntry::new("one", "uno"),
            TmEntry::new("two", "dos"),
        ]);
        assert_eq!(tm.sources(), ["one", "two"]);
        assert_eq!(tm.targets(), ["uno", "dos"]);
        assert!(!tm.is_empty());
    }
}
