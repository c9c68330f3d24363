//! Cross-cutting, shared constants.
//!
//! Scoring weights live here so the composer, the ranker and the tests agree on
//! a single set of numbers.

/// Default verdict threshold (inclusive), on the 0..=100 scale.
pub const DEFAULT_PLAGIARISM_THRESHOLD: f64 = 50.0;

/// Code mode: weight of the semantic signal.
pub const CODE_SEMANTIC_WEIGHT: f64 = 0.4;
/// Code mode: weight of the lexical signal.
pub const CODE_LEXICAL_WEIGHT: f64 = 0.3;
/// Code mode: weight of the structural signal.
pub const CODE_STRUCTURAL_WEIGHT: f64 = 0.3;

/// Text mode: weight of the semantic signal.
pub const TEXT_SEMANTIC_WEIGHT: f64 = 0.6;
/// Text mode: weight of the lexical signal.
pub const TEXT_LEXICAL_WEIGHT: f64 = 0.4;

/// Candidate fragments shorter than this (in chars) are skipped during ranking.
pub const DEFAULT_MIN_FRAGMENT_LEN: usize = 20;

/// Number of code-search hits requested per ranking.
pub const DEFAULT_MAX_CANDIDATES: u32 = 5;

/// Upper bound accepted for [`DEFAULT_MAX_CANDIDATES`] overrides (GitHub caps `per_page` at 100).
pub const MAX_CANDIDATES_LIMIT: u32 = 100;

/// Web search results requested per article check.
pub const ARTICLE_MAX_RESULTS: u32 = 5;

/// Tokens must be strictly longer than this to be highlighted.
pub const HIGHLIGHT_MIN_TOKEN_LEN: usize = 3;

/// Function name used when none can be derived from the input.
pub const FALLBACK_FUNCTION_NAME: &str = "function";

/// Embedding dimension of the default MiniLM-class sentence encoder.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the sentence encoder.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Timeout applied to every outbound HTTP call.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Rounds a percentage to two decimals. Only call this at the presentation boundary.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
