use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::{SearchError, SearchResult};
use super::{ArticleHit, ArticleSearch, CodeHit, CodeSearch};

/// In-memory code host. Files are keyed by `html_url`; a `None` hit is one the
/// host returned without a usable URL.
#[derive(Default)]
pub struct MockCodeSearch {
    hits: Vec<Option<CodeHit>>,
    files: HashMap<String, String>,
    fail_search: Option<(u16, String)>,
    queries: Mutex<Vec<String>>,
}

impl MockCodeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hit whose raw download succeeds with `contents`.
    pub fn with_file(mut self, html_url: &str, contents: &str) -> Self {
        self.hits.push(Some(CodeHit::new(html_url)));
        self.files.insert(html_url.to_string(), contents.to_string());
        self
    }

    /// Adds a hit whose raw download fails.
    pub fn with_broken_file(mut self, html_url: &str) -> Self {
        self.hits.push(Some(CodeHit::new(html_url)));
        self
    }

    /// Adds a hit that cannot be decoded.
    pub fn with_malformed_hit(mut self) -> Self {
        self.hits.push(None);
        self
    }

    /// Makes every search fail with the given upstream status.
    pub fn failing(mut self, status: u16, body: &str) -> Self {
        self.fail_search = Some((status, body.to_string()));
        self
    }

    /// Queries received so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CodeSearch for MockCodeSearch {
    async fn search_code(
        &self,
        query: &str,
        _token: &str,
        per_page: u32,
    ) -> SearchResult<Vec<SearchResult<CodeHit>>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }

        if let Some((status, body)) = &self.fail_search {
            return Err(SearchError::Status {
                service: "GitHub",
                status: *status,
                body: body.clone(),
            });
        }

        Ok(self
            .hits
            .iter()
            .take(per_page as usize)
            .map(|hit| {
                hit.clone().ok_or_else(|| SearchError::Decode {
                    service: "GitHub",
                    reason: "missing field `html_url`".to_string(),
                })
            })
            .collect())
    }

    async fn fetch_raw(&self, hit: &CodeHit) -> SearchResult<String> {
        self.files
            .get(&hit.html_url)
            .cloned()
            .ok_or(SearchError::Status {
                service: "GitHub",
                status: 404,
                body: String::new(),
            })
    }
}

/// Canned web search results.
#[derive(Default)]
pub struct MockArticleSearch {
    results: Vec<ArticleHit>,
    fail: bool,
}

impl MockArticleSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, title: Option<&str>, url: Option<&str>, content: &str) -> Self {
        self.results.push(ArticleHit {
            title: title.map(str::to_string),
            url: url.map(str::to_string),
            content: content.to_string(),
        });
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl ArticleSearch for MockArticleSearch {
    async fn search_articles(
        &self,
        _query: &str,
        _api_key: &str,
        max_results: u32,
    ) -> SearchResult<Vec<ArticleHit>> {
        if self.fail {
            return Err(SearchError::Status {
                service: "Tavily",
                status: 401,
                body: "invalid api key".to_string(),
            });
        }

        Ok(self
            .results
            .iter()
            .take(max_results as usize)
            .cloned()
            .collect())
    }
}
