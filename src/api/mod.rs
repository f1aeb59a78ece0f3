//! REST API endpoints.
//!
//! Axum-based HTTP API exposing player summaries, battle-log statistics,
//! per-brawler views and head-to-head comparisons.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::fetch::FetchError;
use crate::models::PlayerTag;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound(what) => ApiError::NotFound(what),
            FetchError::InvalidUrl(_) | FetchError::InvalidToken => {
                ApiError::Internal(err.to_string())
            }
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Normalize a tag taken from the URL, rejecting empty or non-alphanumeric
/// input.
pub fn parse_tag(raw: &str) -> Result<PlayerTag, ApiError> {
    let tag = PlayerTag::new(raw);
    if tag.is_empty() {
        return Err(ApiError::BadRequest("Player tag is empty".to_string()));
    }
    if !tag.as_str().chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::BadRequest(format!("Invalid player tag: {}", raw)));
    }
    Ok(tag)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET]);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Ignoring invalid CORS origin {:?}", origin);
            layer
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/players/:tag", get(routes::players::player_summary))
        .route(
            "/api/players/:tag/battlelog/stats",
            get(routes::players::battle_log_stats),
        )
        .route(
            "/api/players/:tag/brawlers/:id/stats",
            get(routes::players::brawler_stats),
        )
        .route("/api/compare/:a/:b", get(routes::compare::compare))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        assert_eq!(parse_tag("#abc123").unwrap().as_str(), "ABC123");
        assert_eq!(parse_tag("%2392QQ").unwrap().as_str(), "92QQ");
        assert!(matches!(parse_tag("  "), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_tag("#AB/CD"), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_fetch_error_mapping() {
        let err: ApiError = FetchError::NotFound("player".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = FetchError::HttpStatus {
            status: 503,
            message: "down".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Upstream(_)));

        let err: ApiError = FetchError::InvalidToken.into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Upstream("x".into()), StatusCode::BAD_GATEWAY),
            (ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
