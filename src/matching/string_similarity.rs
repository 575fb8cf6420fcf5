//! String similarity ratios on a 0-100 scale.
//!
//! The default ratio is the normalized InDel similarity: the share of
//! characters two strings keep in common once only insertions and
//! deletions are allowed, computed by `rapidfuzz`. `strsim` supplies the
//! alternative metrics.

use rapidfuzz::fuzz;

/// Normalized InDel ratio between two strings, on Unicode scalar values.
///
/// `100 * 2 * lcs / (|a| + |b|)`. Two empty inputs are identical (100).
#[must_use]
pub fn indel_ratio(a: &str, b: &str) -> f64 {
    fuzz::ratio(a.chars(), b.chars()) * 100.0
}

/// Normalized Levenshtein similarity scaled to 0-100.
#[must_use]
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Jaro-Winkler similarity scaled to 0-100.
#[must_use]
pub fn jaro_winkler_ratio(a: &str, b: &str) -> f64 {
    strsim::jaro_winkler(a, b) * 100.0
}

/// Apply a cutoff and round to a whole percentage.
///
/// Raw scores below `cutoff` are reported as 0.
#[must_use]
pub fn quantize(raw: f64, cutoff: f64) -> u8 {
    if raw < cutoff || raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
