//! HTTP gateway (Axum) for plagiarism checks, source search and rewrites.
//!
//! Every POST endpoint takes and returns JSON. Responses carry an
//! `X-Plagcheck-Status` header (`ok`, `invalid_request`, `upstream_error`, ...).

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::GatewayError;
pub use handler::{
    check_article_handler, check_plagiarism_handler, deplagiarize_handler,
    generate_report_handler, search_github_handler,
};
pub use state::HandlerState;

pub const PLAGCHECK_STATUS_HEADER: &str = "X-Plagcheck-Status";
pub const PLAGCHECK_STATUS_OK: &str = "ok";
pub const PLAGCHECK_STATUS_HEALTHY: &str = "healthy";
pub const PLAGCHECK_STATUS_READY: &str = "ready";

/// Banner served on `GET /`.
pub const ROOT_BANNER: &str = "Backend Running!";

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/check_plagiarism", post(check_plagiarism_handler))
        .route("/search_github_code", post(search_github_handler))
        .route("/generate_report", post(generate_report_handler))
        .route("/deplagiarize", post(deplagiarize_handler))
        .route("/check_article", post(check_article_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub embedding: &'static str,
    pub embedder_mode: &'static str,
    pub threshold: f64,
}

pub async fn root_handler() -> &'static str {
    ROOT_BANNER
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        PLAGCHECK_STATUS_HEADER,
        HeaderValue::from_static(PLAGCHECK_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// The embedder is loaded before the listener binds, so a served request is always ready.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let embedder_mode = if state.embedder_stub { "stub" } else { "real" };

    let components = ComponentStatus {
        http: PLAGCHECK_STATUS_READY,
        embedding: PLAGCHECK_STATUS_READY,
        embedder_mode,
        threshold: state.scorer.threshold(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        PLAGCHECK_STATUS_HEADER,
        HeaderValue::from_static(PLAGCHECK_STATUS_READY),
    );

    (
        StatusCode::OK,
        headers,
        Json(ReadyResponse {
            status: "ok",
            components,
        }),
    )
        .into_response()
}
