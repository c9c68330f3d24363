//! Request and response bodies.
//!
//! Missing string fields default to empty so that "absent" and "blank" are
//! rejected by the same required-field check.

use serde::{Deserialize, Serialize};

use crate::scoring::Verdict;

fn default_true() -> bool {
    true
}

fn default_deplagiarize_mode() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckPlagiarismRequest {
    #[serde(default)]
    pub input_code: String,
    #[serde(default)]
    pub fetched_code: String,
    #[serde(default = "default_true")]
    pub is_code: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckPlagiarismResponse {
    pub semantic_similarity: f64,
    pub lexical_similarity: f64,
    pub structural_similarity: f64,
    pub final_plagiarism_score: f64,
    pub status: Verdict,
    pub matched_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchGithubRequest {
    #[serde(default)]
    pub input_code: String,
    #[serde(default)]
    pub github_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchGithubResponse {
    pub fetched_code: String,
    pub source: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub text1: String,
    #[serde(default)]
    pub text2: String,
    #[serde(default)]
    pub is_code: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub text1: String,
    pub text2: String,
    pub semantic_similarity: f64,
    pub lexical_similarity: f64,
    pub structural_similarity: f64,
    pub final_score: f64,
    pub status: Verdict,
    pub highlighted_text1: String,
    pub highlighted_text2: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeplagiarizeRequest {
    #[serde(default)]
    pub input_text: String,
    #[serde(default = "default_deplagiarize_mode")]
    pub mode: String,
    #[serde(default)]
    pub openrouter_api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeplagiarizeResponse {
    pub deplagiarized_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckArticleRequest {
    #[serde(default)]
    pub article_text: String,
    #[serde(default)]
    pub tavily_api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleMatch {
    pub title: String,
    pub url: String,
    pub similarity: f64,
    pub matched_content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckArticleResponse {
    pub input_text: String,
    pub matches: Vec<ArticleMatch>,
}
