use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use tracing::debug;

use crate::embedding::{EmbeddingError, EmbeddingProvider};

use super::types::{Mode, SimilarityTriple};

/// Computes the similarity signals for a pair of texts.
///
/// Only the semantic signal touches the embedding provider; lexical and
/// structural similarity are pure functions re-exported at module level.
#[derive(Clone)]
pub struct SimilarityEngine {
    provider: Arc<dyn EmbeddingProvider>,
}

impl std::fmt::Debug for SimilarityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityEngine")
            .field("embedding_dim", &self.provider.embedding_dim())
            .field("stub", &self.provider.is_stub())
            .finish()
    }
}

impl SimilarityEngine {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.provider
    }

    /// Cosine similarity of the two embeddings, times 100.
    ///
    /// Returns `0.0` without calling the provider when either text is empty
    /// after trimming.
    pub fn semantic_similarity(&self, a: &str, b: &str) -> Result<f64, EmbeddingError> {
        let (a, b) = (a.trim(), b.trim());
        if a.is_empty() || b.is_empty() {
            return Ok(0.0);
        }

        let ea = self.provider.embed(a)?;
        let eb = self.provider.embed(b)?;

        if ea.len() != eb.len() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: ea.len(),
                actual: eb.len(),
            });
        }

        Ok(cosine_similarity(&ea, &eb) * 100.0)
    }

    pub fn lexical_similarity(&self, a: &str, b: &str) -> f64 {
        lexical_similarity(a, b)
    }

    pub fn structural_similarity(&self, a: &str, b: &str) -> f64 {
        structural_similarity(a, b)
    }

    /// All three signals for `mode`. Structural is skipped (left at 0) in text mode.
    pub fn triple(&self, a: &str, b: &str, mode: Mode) -> Result<SimilarityTriple, EmbeddingError> {
        let semantic = self.semantic_similarity(a, b)?;
        let lexical = lexical_similarity(a, b);
        let structural = match mode {
            Mode::Code => structural_similarity(a, b),
            Mode::Text => 0.0,
        };

        debug!(
            %mode,
            semantic,
            lexical,
            structural,
            "Computed similarity triple"
        );

        Ok(SimilarityTriple::new(semantic, lexical, structural))
    }
}

/// Cosine similarity in `[-1, 1]`; `0.0` if either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// Jaccard index over lowercase whitespace tokens, as a percentage.
pub fn lexical_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let ta: HashSet<&str> = a.split_whitespace().collect();
    let tb: HashSet<&str> = b.split_whitespace().collect();
    jaccard_percent(&ta, &tb)
}

/// Jaccard index over the ASCII-letter/underscore alphabet of each text, as a percentage.
pub fn structural_similarity(a: &str, b: &str) -> f64 {
    jaccard_percent(&identifier_alphabet(a), &identifier_alphabet(b))
}

fn identifier_alphabet(text: &str) -> HashSet<char> {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '_')
        .collect()
}

fn jaccard_percent<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64 * 100.0
}
