//! Default values for tm-fuzzymatch configuration.

/// Default upper bound on the augmented share of a batch.
pub const DEFAULT_FUZZY_RATIO: f64 = 0.1;

/// Default similarity threshold (0-100).
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 70.0;

/// Default field separator in translation memory files.
pub const DEFAULT_TM_DELIMITER: &str = "\t";

/// Default marker placed between a segment and its fuzzy-matched target.
pub const DEFAULT_FUZZY_TOKEN: &str = "｟fuzzy｠";

/// Default minimum segment length, in characters.
pub const DEFAULT_MIN_LENGTH: usize = 4;

/// Default maximum segment length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 70;

/// Default number of segments scored per scorer call.
///
/// Peak score-matrix size is `chunk_size × |tm|` bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Default worker setting: all available cores.
pub const DEFAULT_WORKERS: i32 = -1;

/// Default number of corpus examples handed to the transform at once.
pub const DEFAULT_BATCH_SIZE: usize = 50_000;
