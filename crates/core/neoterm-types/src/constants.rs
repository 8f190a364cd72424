//! Constants shared across the extraction, detection and orchestration crates.

// =============================================================================
// Extraction
// =============================================================================

/// Minimum length of an emitted term, in characters.
pub const MIN_TERM_LENGTH: usize = 3;

/// Separator between parts of a composition signature.
pub const POS_SEPARATOR: &str = "+";

/// Minimum confidence for a model-reported span to reach the post-filter.
pub const MODEL_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Longest all-numeral composition signature that is skipped (`NUM+NUM+NUM+NUM`).
pub const MAX_NUMERAL_PATTERN: usize = 4;

/// Maximum share of punctuation, symbol and numeral tokens in a kept span.
pub const MAX_BAD_PART_PROPORTION: f64 = 0.5;

// =============================================================================
// Orchestration
// =============================================================================

/// Capacity of the per-run term identity cache.
pub const TERM_ID_CACHE_CAPACITY: usize = 10_000;

/// Entity labels used by the zero-shot biomedical tagger variant.
pub const BIOMEDICAL_LABELS: [&str; 13] = [
    "DISEASE", "DRUG", "ANAT", "DEVICE", "LABPROC", "MEDPROC", "SCIPROC", "FINDING", "PHYS",
    "DISO", "LIVB", "CHEMICAL", "GENE",
];

// =============================================================================
// Detection defaults
// =============================================================================

/// Default minimum length of the longest run of non-zero years.
pub const DEFAULT_MIN_YEARS_PRESENT: u32 = 3;

/// Default minimum growth ratio.
pub const DEFAULT_MIN_GROWTH: f64 = 1.5;

/// Default minimum number of mentions across all years.
pub const DEFAULT_MIN_TOTAL_MENTIONS: u64 = 3;
