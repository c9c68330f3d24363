use serde::Serialize;
use thiserror::Error;

/// A retrieved document to be considered as a plagiarism source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Where the text came from (e.g. a GitHub `html_url`).
    pub source_identifier: String,
    pub raw_text: String,
}

impl Candidate {
    pub fn new(source_identifier: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            source_identifier: source_identifier.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// The function block extracted from a candidate, ready for scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFragment {
    /// Position of the candidate in the input sequence.
    pub index: usize,
    pub source_identifier: String,
    pub code: String,
}

/// Why a candidate did not take part in ranking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("no definition of `{function_name}` found")]
    NoFunctionMatch { function_name: String },

    #[error("fragment too short ({len} < {min} chars)")]
    FragmentTooShort { len: usize, min: usize },

    #[error("retrieval failed: {reason}")]
    Retrieval { reason: String },

    #[error("scoring failed: {reason}")]
    Scoring { reason: String },
}

/// The best-scoring candidate of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateMatch {
    pub index: usize,
    pub source_identifier: String,
    pub code_or_text: String,
    /// Unrounded code-mode composite score.
    pub score: f64,
}

/// Full outcome of a ranking, including what was skipped and why.
#[derive(Debug, Clone, Default)]
pub struct RankReport {
    pub best: Option<CandidateMatch>,
    /// Number of candidates that reached scoring.
    pub scored: usize,
    pub skipped: Vec<(usize, SkipReason)>,
}

impl RankReport {
    /// Best score, or `0.0` when nothing survived.
    pub fn best_score(&self) -> f64 {
        self.best.as_ref().map_or(0.0, |m| m.score)
    }
}
