#![no_main]
use libfuzzer_sys::fuzz_target;
use tm_fuzzymatch::matching::string_similarity::indel_ratio;
use tm_fuzzymatch::{AugmentOptions, BatchAugmenter, TmEntry, TranslationMemory};

/// Fuzz batch augmentation.
///
/// The first line is the query batch (split on `|`), the remaining lines
/// are `source\ttarget` TM units.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if s.len() > 4_096 {
        return;
    }
    let mut lines = s.lines();
    let batch: Vec<String> = lines
        .next()
        .unwrap_or_default()
        .split('|')
        .map(str::to_string)
        .collect();
    let tm = TranslationMemory::from_entries(lines.filter_map(|line| {
        line.split_once('\t')
            .map(|(source, target)| TmEntry::new(source, target))
    }));

    for (a, b) in batch.iter().zip(tm.sources()) {
        let ratio = indel_ratio(a, b);
        assert!((0.0..=100.0).contains(&ratio));
    }

    let augmenter = BatchAugmenter::with_default_scorer(
        tm,
        AugmentOptions {
            ratio: 0.5,
            token: "[F]".to_string(),
            ..AugmentOptions::default()
        },
    );
    let out = augmenter.augment(&batch).expect("augment");
    assert_eq!(out.segments.len(), batch.len());
    for (before, after) in batch.iter().zip(&out.segments) {
        assert!(after.starts_with(before.as_str()));
    }
});
