use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Mount the liveness route at `/api/health`.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health::health_check))
}
