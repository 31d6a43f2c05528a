/// Plain-text liveness marker.
pub const HEALTH_MESSAGE: &str = "Hello! I am healthy!";

/// GET /api/health
///
/// Liveness only; does not touch the record source.
pub async fn health_check() -> &'static str {
    HEALTH_MESSAGE
}
