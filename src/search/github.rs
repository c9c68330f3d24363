use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::debug;

use super::error::{SearchError, SearchResult};
use super::{CodeHit, CodeSearch};

const SERVICE: &str = "GitHub";
const USER_AGENT: &str = concat!("plagcheck/", env!("CARGO_PKG_VERSION"));

/// Maps a `github.com/.../blob/...` browser URL to its `raw.githubusercontent.com` form.
pub fn raw_url_for(html_url: &str) -> String {
    html_url
        .replace("github.com", "raw.githubusercontent.com")
        .replace("/blob", "")
}

#[derive(Debug, Deserialize)]
struct CodeSearchResponse {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// Decodes a code-search body item by item.
///
/// Only an undecodable envelope is an error; a malformed item becomes an `Err`
/// in its own slot so the remaining hits keep their positions.
pub(crate) fn decode_search_items(
    body: &str,
    per_page: u32,
) -> SearchResult<Vec<SearchResult<CodeHit>>> {
    let parsed: CodeSearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Decode {
            service: SERVICE,
            reason: e.to_string(),
        })?;

    Ok(parsed
        .items
        .into_iter()
        .take(per_page as usize)
        .enumerate()
        .map(|(position, item)| {
            serde_json::from_value::<CodeHit>(item).map_err(|e| SearchError::Decode {
                service: SERVICE,
                reason: format!("item {position}: {e}"),
            })
        })
        .collect())
}

/// GitHub REST client for code search and raw downloads.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: HttpClient,
    api_base: String,
}

impl GitHubClient {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> SearchResult<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| SearchError::Http {
                service: SERVICE,
                source,
            })?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[async_trait]
impl CodeSearch for GitHubClient {
    async fn search_code(
        &self,
        query: &str,
        token: &str,
        per_page: u32,
    ) -> SearchResult<Vec<SearchResult<CodeHit>>> {
        let url = format!("{}/search/code", self.api_base);
        let per_page_param = per_page.to_string();
        debug!(%query, per_page, "GitHub code search");

        let response = self
            .http
            .get(&url)
            .query(&[("q", query), ("per_page", per_page_param.as_str())])
            .header("Authorization", format!("token {token}"))
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|source| SearchError::Http {
                service: SERVICE,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|source| SearchError::Http {
            service: SERVICE,
            source,
        })?;

        decode_search_items(&body, per_page)
    }

    async fn fetch_raw(&self, hit: &CodeHit) -> SearchResult<String> {
        let raw_url = hit.raw_url();
        debug!(%raw_url, "Fetching raw file");

        let response = self
            .http
            .get(&raw_url)
            .send()
            .await
            .map_err(|source| SearchError::Http {
                service: SERVICE,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body: String::new(),
            });
        }

        response.text().await.map_err(|source| SearchError::Http {
            service: SERVICE,
            source,
        })
    }
}
