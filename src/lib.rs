//! Plagcheck library crate (used by the server binary and integration tests).
//!
//! # Pipeline
//!
//! - [`SimilarityEngine`]: semantic, lexical and structural similarity of two texts.
//! - [`ScoreComposer`] / [`PairScorer`]: mode-weighted composite score and verdict.
//! - [`CandidateRanker`]: best code-mode match among retrieved candidates.
//! - [`highlight()`]: shared-vocabulary markup for reports.
//!
//! # Collaborators
//!
//! - [`EmbeddingProvider`] / [`SentenceEmbedder`]: text to vector (BERT or stub).
//! - [`CodeSearch`] / [`ArticleSearch`]: GitHub and Tavily retrieval.
//! - [`ChatCompletion`] / [`Rewriter`]: OpenRouter rewrites.
//! - [`gateway`]: the Axum HTTP surface.
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cleaning;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod highlight;
pub mod ranking;
pub mod rewrite;
pub mod scoring;
pub mod search;
pub mod similarity;

pub use cleaning::extract_code_block;
pub use config::{Config, ConfigError};
pub use embedding::{
    EmbeddingError, EmbeddingProvider, SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN,
    SentenceConfig, SentenceEmbedder,
};
pub use gateway::{GatewayError, HandlerState, create_router_with_state};
pub use highlight::{common_tokens, highlight};
pub use ranking::{
    Candidate, CandidateFragment, CandidateMatch, CandidateRanker, RankReport, SkipReason,
    derive_function_name, extract_fragment,
};
#[cfg(any(test, feature = "mock"))]
pub use rewrite::MockChatCompletion;
pub use rewrite::{ChatCompletion, OpenRouterClient, RewriteError, Rewriter};
pub use scoring::{PairScorer, ScoreComposer, ScoredResult, ScoringError, Verdict, weighted_score};
#[cfg(any(test, feature = "mock"))]
pub use search::{MockArticleSearch, MockCodeSearch};
pub use search::{ArticleHit, ArticleSearch, CodeHit, CodeSearch, GitHubClient, SearchError, TavilyClient};
pub use similarity::{
    Mode, SimilarityEngine, SimilarityTriple, cosine_similarity, lexical_similarity,
    structural_similarity,
};
