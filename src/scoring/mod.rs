//! Score composition and verdicts.
//!
//! [`ScoreComposer`] folds a [`SimilarityTriple`](crate::similarity::SimilarityTriple)
//! into one weighted score and classifies it:
//!
//! | Mode | Final score |
//! |------|-------------|
//! | Code | `0.4*semantic + 0.3*lexical + 0.3*structural` |
//! | Text | `0.6*semantic + 0.4*lexical` |
//!
//! The structural term is absent from the text formula, not zero-weighted: a text-mode
//! triple carrying a structural value still composes without it.
//!
//! [`PairScorer`] is the request-facing entry point: it rejects empty input, asks the
//! [`SimilarityEngine`](crate::similarity::SimilarityEngine) for the triple, and composes.
//! Nothing here rounds; call [`ScoredResult::rounded`] at the response boundary.

pub mod composer;
pub mod error;
pub mod scorer;
pub mod types;


pub use composer::{ScoreComposer, weighted_score};
pub use error::ScoringError;
pub use scorer::PairScorer;
pub use types::{ScoredResult, Verdict};
