use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::future::join_all;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, info, instrument, warn};

use crate::cleaning::extract_code_block;
use crate::constants::{ARTICLE_MAX_RESULTS, round2};
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    ArticleMatch, CheckArticleRequest, CheckArticleResponse, CheckPlagiarismRequest,
    CheckPlagiarismResponse, DeplagiarizeRequest, DeplagiarizeResponse, ReportRequest,
    ReportResponse, SearchGithubRequest, SearchGithubResponse,
};
use crate::gateway::state::HandlerState;
use crate::gateway::{PLAGCHECK_STATUS_HEADER, PLAGCHECK_STATUS_OK};
use crate::highlight::highlight;
use crate::ranking::{Candidate, SkipReason, derive_function_name};
use crate::scoring::{ScoredResult, ScoringError};
use crate::search::python_function_query;
use crate::similarity::Mode;

/// `source` reported when the code search itself returned no hits.
pub const SOURCE_SEARCH_EMPTY: &str = "GitHub";
/// `source` reported when hits existed but none survived ranking.
pub const SOURCE_NONE: &str = "No source available";

const NO_TITLE: &str = "No title";
const NO_URL: &str = "No URL";

#[instrument(skip(state, body))]
pub async fn check_plagiarism_handler(
    State(state): State<HandlerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: CheckPlagiarismRequest = parse_request(body)?;

    let input_code = request.input_code.trim().to_string();
    let fetched_code = request.fetched_code.trim();
    if input_code.is_empty() || fetched_code.is_empty() {
        return Err(GatewayError::invalid(
            "Both input_code and fetched_code are required",
        ));
    }

    // A fence with nothing inside cleans to "", which scores 0 rather than failing.
    let matched_code = extract_code_block(fetched_code);
    let mode = Mode::from_is_code(request.is_code);
    let result = score_pair(&state, input_code, matched_code.clone(), mode).await?;

    Ok(make_response(CheckPlagiarismResponse {
        semantic_similarity: result.triple.semantic,
        lexical_similarity: result.triple.lexical,
        structural_similarity: result.triple.structural,
        final_plagiarism_score: result.final_score,
        status: result.status,
        matched_code,
    }))
}

#[instrument(skip(state, body))]
pub async fn search_github_handler(
    State(state): State<HandlerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: SearchGithubRequest = parse_request(body)?;

    let input_code = request.input_code.trim().to_string();
    if input_code.is_empty() {
        return Err(GatewayError::invalid("input_code is required"));
    }
    let token = HandlerState::resolve_key(&request.github_token, state.config.github_token.as_ref())
        .ok_or_else(|| GatewayError::invalid("GitHub token is required"))?;

    let function_name = derive_function_name(&input_code);
    let query = python_function_query(&function_name);

    let hits = state
        .code_search
        .search_code(&query, &token, state.config.max_candidates)
        .await
        .map_err(|e| {
            error!(error = %e, "GitHub code search failed");
            GatewayError::upstream("GitHub API failed", e.details())
        })?;

    if hits.is_empty() {
        info!(function = %function_name, "Code search returned no hits");
        return Ok(make_response(SearchGithubResponse {
            fetched_code: String::new(),
            source: SOURCE_SEARCH_EMPTY.to_string(),
            confidence: 0.0,
        }));
    }

    // Fetched concurrently; join_all keeps hit order, which is the tie-break index.
    let search = &state.code_search;
    let candidates: Vec<Result<Candidate, SkipReason>> = join_all(hits.iter().map(|hit| async move {
        let hit = match hit {
            Ok(hit) => hit,
            Err(e) => {
                return Err(SkipReason::Retrieval {
                    reason: e.to_string(),
                });
            }
        };
        search
            .fetch_raw(hit)
            .await
            .map(|raw| Candidate::new(hit.html_url.clone(), raw.trim()))
            .map_err(|e| SkipReason::Retrieval {
                reason: e.to_string(),
            })
    }))
    .await;

    let ranker = state.ranker.clone();
    let report = tokio::task::spawn_blocking(move || ranker.rank_fetched(&input_code, candidates))
        .await
        .map_err(|e| GatewayError::InternalError(format!("ranking task failed: {}", e)))?;

    let response = match report.best {
        Some(best) => SearchGithubResponse {
            fetched_code: best.code_or_text,
            source: best.source_identifier,
            confidence: round2(best.score),
        },
        None => SearchGithubResponse {
            fetched_code: String::new(),
            source: SOURCE_NONE.to_string(),
            confidence: 0.0,
        },
    };

    Ok(make_response(response))
}

#[instrument(skip(state, body))]
pub async fn generate_report_handler(
    State(state): State<HandlerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: ReportRequest = parse_request(body)?;

    let text1 = request.text1.trim().to_string();
    let text2 = request.text2.trim().to_string();
    if text1.is_empty() || text2.is_empty() {
        return Err(GatewayError::invalid("Both text1 and text2 are required"));
    }

    let mode = Mode::from_is_code(request.is_code);
    let result = score_pair(&state, text1.clone(), text2.clone(), mode).await?;

    let highlighted_text1 = highlight(&text1, &text2);
    let highlighted_text2 = highlight(&text2, &text1);

    Ok(make_response(ReportResponse {
        text1,
        text2,
        semantic_similarity: result.triple.semantic,
        lexical_similarity: result.triple.lexical,
        structural_similarity: result.triple.structural,
        final_score: result.final_score,
        status: result.status,
        highlighted_text1,
        highlighted_text2,
    }))
}

#[instrument(skip(state, body))]
pub async fn deplagiarize_handler(
    State(state): State<HandlerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: DeplagiarizeRequest = parse_request(body)?;

    let input_text = request.input_text.trim();
    if input_text.is_empty() {
        return Err(GatewayError::invalid("input_text is required"));
    }

    let mode = match request.mode.as_str() {
        "text" => Mode::Text,
        "code" => Mode::Code,
        _ => return Err(GatewayError::invalid("Invalid mode")),
    };

    let api_key = HandlerState::resolve_key(
        &request.openrouter_api_key,
        state.config.openrouter_api_key.as_ref(),
    );

    debug!(%mode, input_len = input_text.len(), "De-plagiarising");

    let rewritten = match (mode, api_key) {
        (Mode::Code, None) => {
            return Err(GatewayError::invalid("OpenRouter API key is required"));
        }
        (Mode::Code, Some(api_key)) => state.rewriter.rewrite_code(&api_key, input_text).await,
        (Mode::Text, Some(api_key)) => state.rewriter.paraphrase(&api_key, input_text).await,
        (Mode::Text, None) => {
            warn!("No OpenRouter key for paraphrasing, returning input unchanged");
            Ok(input_text.to_string())
        }
    }
    .map_err(|e| {
        error!(error = %e, %mode, "Rewrite failed");
        GatewayError::upstream("OpenRouter API failed", e.details())
    })?;

    Ok(make_response(DeplagiarizeResponse {
        deplagiarized_text: rewritten,
    }))
}

#[instrument(skip(state, body))]
pub async fn check_article_handler(
    State(state): State<HandlerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: CheckArticleRequest = parse_request(body)?;

    let article_text = request.article_text.trim().to_string();
    if article_text.is_empty() {
        return Err(GatewayError::invalid("article_text is required"));
    }
    let api_key =
        HandlerState::resolve_key(&request.tavily_api_key, state.config.tavily_api_key.as_ref())
            .ok_or_else(|| GatewayError::invalid("Tavily API key is required"))?;

    let hits = state
        .article_search
        .search_articles(&article_text, &api_key, ARTICLE_MAX_RESULTS)
        .await
        .map_err(|e| {
            error!(error = %e, "Article search failed");
            GatewayError::upstream("Tavily API failed", e.details())
        })?;

    let scorer = state.scorer.clone();
    let article = article_text.clone();
    let matches = tokio::task::spawn_blocking(move || {
        hits.into_iter()
            .map(|hit| -> Result<ArticleMatch, ScoringError> {
                let snippet = hit.content.trim().to_string();
                let similarity = if snippet.is_empty() {
                    0.0
                } else {
                    scorer.semantic(&article, &snippet)?
                };
                Ok(ArticleMatch {
                    title: hit.title.unwrap_or_else(|| NO_TITLE.to_string()),
                    url: hit.url.unwrap_or_else(|| NO_URL.to_string()),
                    similarity: round2(similarity),
                    matched_content: snippet,
                })
            })
            .collect::<Result<Vec<_>, _>>()
    })
    .await
    .map_err(|e| GatewayError::InternalError(format!("scoring task failed: {}", e)))??;

    info!(matches = matches.len(), "Article check complete");

    Ok(make_response(CheckArticleResponse {
        input_text: article_text,
        matches,
    }))
}

/// Scores a pair off the async runtime and rounds it for the response.
///
/// Callers run their required-field checks first; whatever reaches here is
/// scored, empty text included.
async fn score_pair(
    state: &HandlerState,
    a: String,
    b: String,
    mode: Mode,
) -> Result<ScoredResult, GatewayError> {
    let scorer = state.scorer.clone();
    let result = tokio::task::spawn_blocking(move || scorer.compare(&a, &b, mode))
        .await
        .map_err(|e| GatewayError::InternalError(format!("scoring task failed: {}", e)))??;

    Ok(result.rounded())
}

pub(crate) fn parse_request<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, GatewayError> {
    serde_json::from_value(body)
        .map_err(|e| GatewayError::invalid(format!("Invalid request schema: {}", e)))
}

pub(crate) fn make_response<T: Serialize>(body: T) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        PLAGCHECK_STATUS_HEADER,
        HeaderValue::from_static(PLAGCHECK_STATUS_OK),
    );

    (StatusCode::OK, headers, Json(body)).into_response()
}
