//! Static bearer token check.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::error::ApiError;
use super::server::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Outcome of comparing a request's `Authorization` header with the configured key.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    /// No key configured, header missing, or not a bearer header.
    Unauthorized,
    /// Bearer token present but wrong.
    Forbidden,
}

pub fn check_bearer(expected: Option<&str>, header: Option<&str>) -> AuthDecision {
    let Some(expected) = expected else {
        return AuthDecision::Unauthorized;
    };
    match header.and_then(|h| h.strip_prefix(BEARER_PREFIX)) {
        None => AuthDecision::Unauthorized,
        Some(token) if token == expected => AuthDecision::Allow,
        Some(_) => AuthDecision::Forbidden,
    }
}

/// Middleware guarding every API route except the health check.
pub async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match check_bearer(state.api_key.as_deref(), header) {
        AuthDecision::Allow => next.run(request).await,
        AuthDecision::Unauthorized => ApiError::unauthorized().into_response(),
        AuthDecision::Forbidden => {
            tracing::debug!(path = %request.uri().path(), "rejected bearer token");
            ApiError::forbidden().into_response()
        }
    }
}
