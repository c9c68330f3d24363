use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request to {service} failed: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned HTTP {status}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to decode {service} response: {reason}")]
    Decode {
        service: &'static str,
        reason: String,
    },
}

impl SearchError {
    /// Upstream response body, when the service answered with an error status.
    pub fn details(&self) -> Option<&str> {
        match self {
            SearchError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
