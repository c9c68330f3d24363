use std::sync::Arc;

use crate::config::Config;
use crate::embedding::EmbeddingProvider;
use crate::ranking::CandidateRanker;
use crate::rewrite::{ChatCompletion, Rewriter};
use crate::scoring::{PairScorer, ScoreComposer, ScoringError};
use crate::search::{ArticleSearch, CodeSearch};
use crate::similarity::SimilarityEngine;

#[derive(Clone)]
pub struct HandlerState {
    pub scorer: Arc<PairScorer>,

    pub ranker: Arc<CandidateRanker>,

    pub code_search: Arc<dyn CodeSearch>,

    pub article_search: Arc<dyn ArticleSearch>,

    pub rewriter: Rewriter,

    pub config: Arc<Config>,

    pub embedder_stub: bool,
}

impl HandlerState {
    /// Wires the scoring pipeline around `provider` using `config`'s threshold and
    /// fragment length. Fails only on an out-of-range threshold.
    pub fn new(
        config: Config,
        provider: Arc<dyn EmbeddingProvider>,
        code_search: Arc<dyn CodeSearch>,
        article_search: Arc<dyn ArticleSearch>,
        chat: Arc<dyn ChatCompletion>,
    ) -> Result<Self, ScoringError> {
        let embedder_stub = provider.is_stub();
        let engine = SimilarityEngine::new(provider);
        let composer = ScoreComposer::new(config.threshold)?;
        let ranker = CandidateRanker::new(engine.clone())
            .with_min_fragment_len(config.min_fragment_len);

        Ok(Self {
            scorer: Arc::new(PairScorer::new(engine, composer)),
            ranker: Arc::new(ranker),
            code_search,
            article_search,
            rewriter: Rewriter::new(chat),
            config: Arc::new(config),
            embedder_stub,
        })
    }

    /// Request value if non-blank, else the server-side fallback.
    pub fn resolve_key(requested: &str, fallback: Option<&String>) -> Option<String> {
        let requested = requested.trim();
        if requested.is_empty() {
            fallback.cloned()
        } else {
            Some(requested.to_string())
        }
    }
}
