use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::gateway::PLAGCHECK_STATUS_HEADER;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("scoring failed: {0}")]
    ScoringFailed(#[from] ScoringError),

    #[error("{message}")]
    UpstreamFailed {
        message: String,
        details: Option<String>,
    },

    #[error("internal error: {0}")]
    InternalError(String),
}

impl GatewayError {
    pub fn invalid(message: impl Into<String>) -> Self {
        GatewayError::InvalidRequest(message.into())
    }

    pub fn upstream(message: impl Into<String>, details: Option<&str>) -> Self {
        GatewayError::UpstreamFailed {
            message: message.into(),
            details: details.map(str::to_string),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, plagcheck_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::ScoringFailed(ScoringError::InvalidInput { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
            GatewayError::ScoringFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "scoring_error")
            }
            GatewayError::UpstreamFailed { .. } => (StatusCode::BAD_GATEWAY, "upstream_error"),
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            PLAGCHECK_STATUS_HEADER,
            HeaderValue::from_static(plagcheck_status),
        );

        let error = self.to_string();
        let details = match self {
            GatewayError::UpstreamFailed { details, .. } => details,
            _ => None,
        };

        let body = Json(ErrorResponse {
            error,
            code: status.as_u16(),
            details,
        });

        (status, headers, body).into_response()
    }
}
