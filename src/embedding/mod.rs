//! Embedding provider and model utilities.
//!
//! - [`provider`] defines the [`EmbeddingProvider`] seam the similarity engine depends on.
//! - [`sentence`] provides the BERT sentence encoder (with a deterministic stub mode).

/// BERT sentence encoder with mean pooling.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Provider trait.
pub mod provider;
/// Sentence embedder (model or stub backend).
pub mod sentence;
/// Tokenizer loading helpers.
pub mod utils;

pub use error::EmbeddingError;
pub use provider::EmbeddingProvider;
pub use sentence::{SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceConfig, SentenceEmbedder};
