use tracing::debug;

use crate::similarity::{Mode, SimilarityEngine};

use super::composer::ScoreComposer;
use super::error::ScoringError;
use super::types::ScoredResult;

/// Scores a single pair end to end.
///
/// Unlike the candidate ranker, failures here are never swallowed: an empty input
/// is [`ScoringError::InvalidInput`] and a provider failure surfaces as
/// [`ScoringError::Embedding`].
#[derive(Debug, Clone)]
pub struct PairScorer {
    engine: SimilarityEngine,
    composer: ScoreComposer,
}

impl PairScorer {
    pub fn new(engine: SimilarityEngine, composer: ScoreComposer) -> Self {
        Self { engine, composer }
    }

    pub fn engine(&self) -> &SimilarityEngine {
        &self.engine
    }

    pub fn composer(&self) -> &ScoreComposer {
        &self.composer
    }

    pub fn threshold(&self) -> f64 {
        self.composer.threshold()
    }

    /// Trims both texts, rejects empties, computes and composes the triple.
    pub fn score(&self, a: &str, b: &str, mode: Mode) -> Result<ScoredResult, ScoringError> {
        if a.trim().is_empty() || b.trim().is_empty() {
            return Err(ScoringError::InvalidInput {
                reason: "both texts must be non-empty".to_string(),
            });
        }

        self.compare(a, b, mode)
    }

    /// Like [`score`](Self::score), but an empty side scores 0 on every signal.
    pub fn compare(&self, a: &str, b: &str, mode: Mode) -> Result<ScoredResult, ScoringError> {
        let (a, b) = (a.trim(), b.trim());
        let triple = self.engine.triple(a, b, mode)?;
        let result = self.composer.compose(triple, mode);

        debug!(
            %mode,
            final_score = result.final_score,
            status = %result.status,
            threshold = self.composer.threshold(),
            "Scored pair"
        );

        Ok(result)
    }

    /// Semantic signal only, for callers that rank by meaning alone.
    pub fn semantic(&self, a: &str, b: &str) -> Result<f64, ScoringError> {
        Ok(self.engine.semantic_similarity(a, b)?)
    }
}
