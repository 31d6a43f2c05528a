use autolist_core::error::QueryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`QueryError`] for pipeline failures and adds HTTP-specific
/// variants. Every error renders as `{ "message": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failure from the query pipeline.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A request that could not be decoded at all.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Query(err @ (QueryError::InvalidPagination | QueryError::InvalidSortOrder)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Query(QueryError::SourceUnavailable(msg)) => {
                tracing::error!(error = %msg, "Record source unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, axum::Json(json!({ "message": message }))).into_response()
    }
}
