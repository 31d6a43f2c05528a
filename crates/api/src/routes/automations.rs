use axum::routing::get;
use axum::Router;

use crate::handlers::automations;
use crate::state::AppState;

/// Listing routes, mounted at the root.
///
/// ```text
/// GET /automations          -> list_automations
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/automations", get(automations::list_automations))
}
