use crate::constants::{
    CODE_LEXICAL_WEIGHT, CODE_SEMANTIC_WEIGHT, CODE_STRUCTURAL_WEIGHT,
    DEFAULT_PLAGIARISM_THRESHOLD, TEXT_LEXICAL_WEIGHT, TEXT_SEMANTIC_WEIGHT,
};
use crate::similarity::{Mode, SimilarityTriple};

use super::error::ScoringError;
use super::types::{ScoredResult, Verdict};

/// Weighted sum of the triple for `mode`.
pub fn weighted_score(triple: &SimilarityTriple, mode: Mode) -> f64 {
    match mode {
        Mode::Code => {
            CODE_SEMANTIC_WEIGHT * triple.semantic
                + CODE_LEXICAL_WEIGHT * triple.lexical
                + CODE_STRUCTURAL_WEIGHT * triple.structural
        }
        Mode::Text => TEXT_SEMANTIC_WEIGHT * triple.semantic + TEXT_LEXICAL_WEIGHT * triple.lexical,
    }
}

/// Combines similarity signals and classifies against an inclusive threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreComposer {
    threshold: f64,
}

impl Default for ScoreComposer {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PLAGIARISM_THRESHOLD,
        }
    }
}

impl ScoreComposer {
    /// Creates a composer; `threshold` must lie within `0..=100`.
    pub fn new(threshold: f64) -> Result<Self, ScoringError> {
        if !(0.0..=100.0).contains(&threshold) {
            return Err(ScoringError::InvalidThreshold { value: threshold });
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn classify(&self, final_score: f64) -> Verdict {
        if final_score >= self.threshold {
            Verdict::Plagiarised
        } else {
            Verdict::Original
        }
    }

    pub fn compose(&self, triple: SimilarityTriple, mode: Mode) -> ScoredResult {
        let final_score = weighted_score(&triple, mode);
        ScoredResult {
            triple,
            final_score,
            status: self.classify(final_score),
        }
    }
}
