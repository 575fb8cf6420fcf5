#![no_main]
use libfuzzer_sys::fuzz_target;
use tm_fuzzymatch::TranslationMemory;

/// Fuzz the translation memory loader.
///
/// Every line of a successfully parsed TM yields at most one unit, and
/// both sides of a unit come back trimmed.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for delimiter in ["\t", "|||"] {
            if let Ok(tm) = TranslationMemory::parse_str(s, delimiter, 0, usize::MAX) {
                assert!(tm.len() <= s.lines().count());
                for (source, target) in tm.iter() {
                    assert_eq!(source, source.trim());
                    assert_eq!(target, target.trim());
                }
            }
        }
    }
});
