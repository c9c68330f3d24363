//! Retrieval of candidate sources.
//!
//! - [`CodeSearch`]: code-host search plus raw file download (GitHub).
//! - [`ArticleSearch`]: web article search (Tavily).
//!
//! Both are traits so the gateway can run against the mocks in [`mock`].

pub mod error;
pub mod github;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod tavily;


pub use error::{SearchError, SearchResult};
pub use github::{GitHubClient, raw_url_for};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockArticleSearch, MockCodeSearch};
pub use tavily::TavilyClient;

use async_trait::async_trait;
use serde::Deserialize;

/// One code-search result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodeHit {
    /// Browser URL of the file; doubles as the candidate's source identifier.
    pub html_url: String,
}

impl CodeHit {
    pub fn new(html_url: impl Into<String>) -> Self {
        Self {
            html_url: html_url.into(),
        }
    }

    /// Download URL for the file's raw contents.
    pub fn raw_url(&self) -> String {
        raw_url_for(&self.html_url)
    }
}

/// One web-search result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ArticleHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Matched snippet.
    #[serde(default)]
    pub content: String,
}

#[async_trait]
/// Code host search used by candidate ranking.
pub trait CodeSearch: Send + Sync {
    /// Runs a code search, returning at most `per_page` hits in host order.
    ///
    /// The outer error fails the whole search; an inner error marks one hit the
    /// host returned in a shape that could not be read.
    async fn search_code(
        &self,
        query: &str,
        token: &str,
        per_page: u32,
    ) -> SearchResult<Vec<SearchResult<CodeHit>>>;

    /// Downloads the raw contents of a hit.
    async fn fetch_raw(&self, hit: &CodeHit) -> SearchResult<String>;
}

#[async_trait]
/// Web article search used by the article check.
pub trait ArticleSearch: Send + Sync {
    async fn search_articles(
        &self,
        query: &str,
        api_key: &str,
        max_results: u32,
    ) -> SearchResult<Vec<ArticleHit>>;
}

/// Code search query for a Python function definition.
pub fn python_function_query(function_name: &str) -> String {
    format!("\"def {function_name}\" language:python")
}
