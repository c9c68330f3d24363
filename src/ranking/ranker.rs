use tracing::{debug, info, warn};

use crate::constants::DEFAULT_MIN_FRAGMENT_LEN;
use crate::scoring::weighted_score;
use crate::similarity::{Mode, SimilarityEngine};

use super::extract::{derive_function_name, extract_fragment};
use super::types::{Candidate, CandidateFragment, CandidateMatch, RankReport, SkipReason};

/// Keeps the best code-mode match among retrieved candidates.
#[derive(Debug, Clone)]
pub struct CandidateRanker {
    engine: SimilarityEngine,
    min_fragment_len: usize,
}

impl CandidateRanker {
    pub fn new(engine: SimilarityEngine) -> Self {
        Self {
            engine,
            min_fragment_len: DEFAULT_MIN_FRAGMENT_LEN,
        }
    }

    pub fn with_min_fragment_len(mut self, min_fragment_len: usize) -> Self {
        self.min_fragment_len = min_fragment_len;
        self
    }

    pub fn min_fragment_len(&self) -> usize {
        self.min_fragment_len
    }

    /// Best match among `candidates`, or `None` when none survives extraction.
    pub fn rank(&self, primary: &str, candidates: &[Candidate]) -> Option<CandidateMatch> {
        self.rank_fetched(primary, candidates.iter().cloned().map(Ok))
            .best
    }

    /// Ranks candidates whose retrieval may already have failed.
    ///
    /// The position in `candidates` is the candidate index used for tie-breaks;
    /// an `Err` entry is recorded as skipped and does not shift later indices.
    pub fn rank_fetched<I>(&self, primary: &str, candidates: I) -> RankReport
    where
        I: IntoIterator<Item = Result<Candidate, SkipReason>>,
    {
        let primary = primary.trim();
        let function_name = derive_function_name(primary);
        let mut report = RankReport::default();

        for (index, candidate) in candidates.into_iter().enumerate() {
            let scored = candidate
                .and_then(|c| self.fragment(index, c, &function_name))
                .and_then(|fragment| self.score_fragment(primary, fragment));

            let candidate_match = match scored {
                Ok(m) => m,
                Err(reason) => {
                    warn!(index, %reason, "Skipping candidate");
                    report.skipped.push((index, reason));
                    continue;
                }
            };

            report.scored += 1;
            debug!(
                index,
                source = %candidate_match.source_identifier,
                score = candidate_match.score,
                "Scored candidate"
            );

            // Strictly greater: on a tie the earlier candidate stays best.
            let replace = match &report.best {
                None => true,
                Some(best) => candidate_match.score > best.score,
            };
            if replace {
                report.best = Some(candidate_match);
            }
        }

        info!(
            function = %function_name,
            scored = report.scored,
            skipped = report.skipped.len(),
            best_score = report.best_score(),
            "Candidate ranking complete"
        );

        report
    }

    fn fragment(
        &self,
        index: usize,
        candidate: Candidate,
        function_name: &str,
    ) -> Result<CandidateFragment, SkipReason> {
        let code = extract_fragment(&candidate.raw_text, function_name, self.min_fragment_len)?;
        Ok(CandidateFragment {
            index,
            source_identifier: candidate.source_identifier,
            code,
        })
    }

    fn score_fragment(
        &self,
        primary: &str,
        fragment: CandidateFragment,
    ) -> Result<CandidateMatch, SkipReason> {
        let triple = self
            .engine
            .triple(primary, &fragment.code, Mode::Code)
            .map_err(|e| SkipReason::Scoring {
                reason: e.to_string(),
            })?;

        Ok(CandidateMatch {
            index: fragment.index,
            source_identifier: fragment.source_identifier,
            code_or_text: fragment.code,
            score: weighted_score(&triple, Mode::Code),
        })
    }
}
