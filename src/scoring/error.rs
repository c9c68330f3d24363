use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("embedding provider failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("invalid threshold {value}: must be between 0 and 100")]
    InvalidThreshold { value: f64 },
}
