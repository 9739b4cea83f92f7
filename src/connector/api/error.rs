use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;

/// The only error body the proxy ever returns.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to communicate with Gemini";

/// Failure of the proxy route. The detail is logged, never sent.
#[derive(Debug)]
pub enum ApiError {
    Upstream(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Upstream(detail) = self;
        tracing::error!("upstream call failed: {detail}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: UPSTREAM_FAILURE_MESSAGE,
            }),
        )
            .into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::Upstream(e.to_string())
    }
}
