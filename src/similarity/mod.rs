//! Pairwise similarity measures.
//!
//! Three independent signals, each on a 0..=100 percentage scale:
//!
//! - **semantic**: cosine of the two embeddings, times 100. Negative cosine is
//!   kept as a negative percentage.
//! - **lexical**: Jaccard index over lowercase whitespace tokens.
//! - **structural**: Jaccard index over the *set of characters* left after
//!   removing everything that is not an ASCII letter or `_`.
//!
//! The structural signal is an alphabet-overlap proxy, not an AST comparison:
//! two programs using the same identifier letters score 100 regardless of shape.
//! Tokenizing by language grammar would be the natural upgrade.

pub mod engine;
pub mod types;


pub use engine::{
    SimilarityEngine, cosine_similarity, lexical_similarity, structural_similarity,
};
pub use types::{Mode, SimilarityTriple};
