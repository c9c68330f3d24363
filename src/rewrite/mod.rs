//! De-plagiarisation through a chat-completion model.
//!
//! [`Rewriter`] builds the prompts and post-processes replies; the model call itself
//! goes through the [`ChatCompletion`] seam ([`OpenRouterClient`] in production).
//!
//! - code: one rewrite, fenced block extracted when present.
//! - text: up to [`MAX_PARAPHRASES`] one-per-line paraphrases; the first that differs
//!   from the input (ignoring case) wins, otherwise the input comes back unchanged.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod openrouter;

#[cfg(test)]
mod tests;

pub use error::{RewriteError, RewriteResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockChatCompletion;
pub use openrouter::OpenRouterClient;

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::cleaning::extract_code_block;

/// Paraphrases requested per text rewrite.
pub const MAX_PARAPHRASES: usize = 10;

static LIST_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:\d+[.)]|[-*•])\s*").expect("Valid list marker regex")
});

#[async_trait]
/// A single-turn chat completion.
pub trait ChatCompletion: Send + Sync {
    /// Sends `prompt` as one user message and returns the reply content.
    async fn complete(&self, api_key: &str, prompt: &str) -> RewriteResult<String>;
}

/// Prompt for a functionality-preserving code rewrite.
pub fn code_prompt(code: &str) -> String {
    format!("Rewrite this code to avoid plagiarism but keep functionality:\n\n{code}")
}

/// Prompt asking for one paraphrase per line.
pub fn paraphrase_prompt(text: &str) -> String {
    format!(
        "Paraphrase the following text in up to {MAX_PARAPHRASES} different ways. \
         Reply with one paraphrase per line and nothing else.\n\n{text}"
    )
}

/// Splits a model reply into paraphrase candidates.
///
/// Blank lines are dropped; list markers (`1.`, `2)`, `-`) and wrapping quotes are stripped.
pub fn parse_paraphrases(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(|line| {
            let line = LIST_MARKER.replace(line, "");
            line.trim().trim_matches('"').trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .take(MAX_PARAPHRASES)
        .collect()
}

/// First candidate that differs from `input` ignoring case, else `input`.
pub fn pick_paraphrase(input: &str, candidates: &[String]) -> String {
    let folded = input.to_lowercase();
    candidates
        .iter()
        .find(|c| c.to_lowercase() != folded)
        .cloned()
        .unwrap_or_else(|| input.to_string())
}

#[derive(Clone)]
pub struct Rewriter {
    chat: Arc<dyn ChatCompletion>,
}

impl std::fmt::Debug for Rewriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rewriter").finish_non_exhaustive()
    }
}

impl Rewriter {
    pub fn new(chat: Arc<dyn ChatCompletion>) -> Self {
        Self { chat }
    }

    /// Rewrites code, keeping only the fenced block of the reply when there is one.
    pub async fn rewrite_code(&self, api_key: &str, code: &str) -> RewriteResult<String> {
        let reply = self.chat.complete(api_key, &code_prompt(code)).await?;
        Ok(extract_code_block(reply.trim()))
    }

    /// Paraphrases prose.
    pub async fn paraphrase(&self, api_key: &str, text: &str) -> RewriteResult<String> {
        let reply = self.chat.complete(api_key, &paraphrase_prompt(text)).await?;
        let candidates = parse_paraphrases(&reply);
        debug!(candidates = candidates.len(), "Paraphrase candidates received");
        Ok(pick_paraphrase(text, &candidates))
    }
}
