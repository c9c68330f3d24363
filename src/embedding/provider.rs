use super::error::EmbeddingError;

/// Maps text to a fixed-length vector.
///
/// Implementations must be deterministic for identical input and safe to share
/// across request tasks; the similarity engine holds one behind an `Arc` for the
/// lifetime of the process.
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a single string. The returned vector has [`embedding_dim`](Self::embedding_dim) entries.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Output dimensionality.
    fn embedding_dim(&self) -> usize;

    /// `true` when the provider produces placeholder vectors rather than model output.
    fn is_stub(&self) -> bool {
        false
    }
}
