/// Message returned for out-of-range or malformed `page` / `limit` input.
pub const INVALID_PAGINATION_MESSAGE: &str =
    "Invalid pagination parameters. Page must be >= 1, limit must be between 1 and 50000";

/// Message returned for a `sortOrder` outside `asc` / `desc`.
pub const INVALID_SORT_ORDER_MESSAGE: &str = "Invalid sort order. Must be \"asc\" or \"desc\"";

/// Failures of the query pipeline.
///
/// The two validation variants carry fixed messages that are part of the
/// HTTP contract. [`QueryError::SourceUnavailable`] keeps the underlying
/// failure text untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("{}", INVALID_PAGINATION_MESSAGE)]
    InvalidPagination,

    #[error("{}", INVALID_SORT_ORDER_MESSAGE)]
    InvalidSortOrder,

    #[error("{0}")]
    SourceUnavailable(String),
}

/// A record source could not produce its collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct SourceError(pub String);

impl From<SourceError> for QueryError {
    fn from(err: SourceError) -> Self {
        Self::SourceUnavailable(err.0)
    }
}

impl QueryError {
    /// Whether the caller can fix the request and retry.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidPagination | Self::InvalidSortOrder)
    }
}
