use thiserror::Error;

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("chat completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat completion returned HTTP {status}")]
    Status { status: u16, body: String },

    #[error("chat completion reply had no content")]
    EmptyReply,
}

impl RewriteError {
    /// Upstream response body, when the service answered with an error status.
    pub fn details(&self) -> Option<&str> {
        match self {
            RewriteError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type RewriteResult<T> = Result<T, RewriteError>;
