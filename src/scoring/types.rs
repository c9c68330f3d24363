use serde::{Deserialize, Serialize};

use crate::constants::round2;
use crate::similarity::SimilarityTriple;

/// Binary outcome of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Original,
    Plagiarised,
}

impl Verdict {
    /// Wire representation (`"Original"` / `"Plagiarised"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Original => "Original",
            Verdict::Plagiarised => "Plagiarised",
        }
    }

    pub fn is_plagiarised(&self) -> bool {
        matches!(self, Verdict::Plagiarised)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// A composed comparison result.
pub struct ScoredResult {
    pub triple: SimilarityTriple,
    pub final_score: f64,
    pub status: Verdict,
}

impl ScoredResult {
    /// Copy with every score rounded to two decimals. The verdict is kept as
    /// computed from the unrounded score.
    pub fn rounded(&self) -> Self {
        Self {
            triple: SimilarityTriple::new(
                round2(self.triple.semantic),
                round2(self.triple.lexical),
                round2(self.triple.structural),
            ),
            final_score: round2(self.final_score),
            status: self.status,
        }
    }
}
