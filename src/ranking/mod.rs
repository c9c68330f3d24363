//! Candidate ranking.
//!
//! Given a primary code snippet and candidate documents retrieved elsewhere, the
//! [`CandidateRanker`] pulls the function matching the primary's name out of each
//! document, scores the fragment in code mode, and keeps the single best one.
//!
//! Extraction is a pure step returning `Result<CandidateFragment, SkipReason>`; a
//! candidate that fails to fetch, extract, or embed is logged and skipped, never
//! aborting the ranking. Ties keep the lowest candidate index, so ranking is
//! reproducible even when candidates were fetched concurrently.

pub mod extract;
pub mod ranker;
pub mod types;


pub use extract::{derive_function_name, extract_fragment};
pub use ranker::CandidateRanker;
pub use types::{Candidate, CandidateFragment, CandidateMatch, RankReport, SkipReason};
