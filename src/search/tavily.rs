use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{SearchError, SearchResult};
use super::{ArticleHit, ArticleSearch};

const SERVICE: &str = "Tavily";

#[derive(Debug, Serialize)]
struct TavilySearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct TavilySearchResponse {
    #[serde(default)]
    results: Vec<ArticleHit>,
}

/// Tavily web search client.
#[derive(Debug, Clone)]
pub struct TavilyClient {
    http: HttpClient,
    api_base: String,
}

impl TavilyClient {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> SearchResult<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
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
}

#[async_trait]
impl ArticleSearch for TavilyClient {
    async fn search_articles(
        &self,
        query: &str,
        api_key: &str,
        max_results: u32,
    ) -> SearchResult<Vec<ArticleHit>> {
        let url = format!("{}/search", self.api_base);
        debug!(query_len = query.len(), max_results, "Tavily search");

        let response = self
            .http
            .post(&url)
            .json(&TavilySearchRequest {
                api_key,
                query,
                max_results,
            })
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

        let parsed: TavilySearchResponse =
            response.json().await.map_err(|e| SearchError::Decode {
                service: SERVICE,
                reason: e.to_string(),
            })?;

        Ok(parsed.results)
    }
}
