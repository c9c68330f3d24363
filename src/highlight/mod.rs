//! Shared-vocabulary highlighting for reports.
//!
//! Tokens are lowercase whitespace-separated words common to both texts and
//! longer than three characters. Every whole-word, case-insensitive occurrence in
//! the base text is wrapped in `<mark>…</mark>`, keeping its original casing.
//!
//! All tokens are matched in a single pass, so a marker inserted for one token
//! is never rescanned for another. Feeding highlighted output back in is *not*
//! idempotent: `mark` is itself a four-letter word and can be matched inside
//! existing markers.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::constants::HIGHLIGHT_MIN_TOKEN_LEN;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// Lowercase tokens present in both texts that qualify for highlighting, sorted.
pub fn common_tokens(base_text: &str, compare_text: &str) -> BTreeSet<String> {
    let base = base_text.to_lowercase();
    let compare = compare_text.to_lowercase();
    let base_tokens: BTreeSet<&str> = base.split_whitespace().collect();
    let compare_tokens: BTreeSet<&str> = compare.split_whitespace().collect();

    base_tokens
        .intersection(&compare_tokens)
        .filter(|token| token.chars().count() > HIGHLIGHT_MIN_TOKEN_LEN)
        .map(|token| token.to_string())
        .collect()
}

/// Returns `base_text` with shared vocabulary wrapped in `<mark>` tags.
pub fn highlight(base_text: &str, compare_text: &str) -> String {
    let tokens = common_tokens(base_text, compare_text);
    if tokens.is_empty() {
        return base_text.to_string();
    }

    match build_pattern(&tokens) {
        Ok(re) => re
            .replace_all(base_text, |caps: &regex::Captures<'_>| {
                format!("{MARK_OPEN}{}{MARK_CLOSE}", &caps[0])
            })
            .into_owned(),
        Err(e) => {
            warn!(error = %e, tokens = tokens.len(), "Highlight pattern rejected, returning text unmarked");
            base_text.to_string()
        }
    }
}

fn build_pattern(tokens: &BTreeSet<String>) -> Result<Regex, regex::Error> {
    // Longest first so a token never loses to its own prefix in the alternation.
    let mut ordered: Vec<&String> = tokens.iter().collect();
    ordered.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternation = ordered
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
        .case_insensitive(true)
        .size_limit(1 << 24)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_tokens_not_highlighted() {
        assert_eq!(highlight("the cat sat", "the dog sat"), "the cat sat");
    }

    #[test]
    fn test_four_letter_token_highlighted() {
        assert_eq!(
            highlight("the lazy cat", "a lazy dog"),
            "the <mark>lazy</mark> cat"
        );
    }

    #[test]
    fn test_case_insensitive_keeps_original_casing() {
        assert_eq!(
            highlight("Quick thinking, quick QUICK", "quick"),
            "<mark>Quick</mark> thinking, <mark>quick</mark> <mark>QUICK</mark>"
        );
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(
            highlight("cart carton", "cart"),
            "<mark>cart</mark> carton"
        );
    }

    #[test]
    fn test_occurrence_inside_punctuation_is_marked() {
        assert_eq!(
            highlight("(return value) and return", "return"),
            "(<mark>return</mark> value) and <mark>return</mark>"
        );
    }

    #[test]
    fn test_multiple_tokens() {
        assert_eq!(
            highlight("plagiarism detection works", "detection of plagiarism"),
            "<mark>plagiarism</mark> <mark>detection</mark> works"
        );
    }

    #[test]
    fn test_overlapping_prefix_tokens_prefer_longest() {
        // "data" and "database" are both common; "database" must stay whole.
        assert_eq!(
            highlight("data database", "database data"),
            "<mark>data</mark> <mark>database</mark>"
        );
    }

    #[test]
    fn test_no_common_tokens() {
        assert_eq!(highlight("alpha beta", "gamma delta"), "alpha beta");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(highlight("", "anything here"), "");
        assert_eq!(highlight("keep this", ""), "keep this");
    }

    #[test]
    fn test_marker_not_rescanned_within_one_call() {
        let out = highlight("mark words", "mark words");
        assert_eq!(out, "<mark>mark</mark> <mark>words</mark>");
    }

    #[test]
    fn test_common_tokens_filters_and_sorts() {
        let tokens = common_tokens("Zeta the alpha beta", "beta zeta THE alpha");
        let tokens: Vec<_> = tokens.into_iter().collect();
        assert_eq!(tokens, vec!["alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_token_with_regex_metacharacters() {
        assert_eq!(
            highlight("call foo.bar now", "foo.bar"),
            "call <mark>foo.bar</mark> now"
        );
    }
}
