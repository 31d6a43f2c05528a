use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use autolist_core::automation::Automation;
use autolist_core::pipeline::{self, PageResult};
use autolist_core::query::collect_params;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /automations
///
/// Paginated, filterable, sortable listing. Query keys: `page`, `limit`,
/// `sortBy`, `sortOrder`, `name`, `type`, `status`, `creationTime`; any
/// other key is ignored. When a key repeats, the first value wins.
pub async fn list_automations(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<PageResult<Automation>>> {
    let Query(pairs) = params.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let params = collect_params(pairs);

    let result = pipeline::execute(state.source.as_ref(), &params).await?;

    tracing::debug!(
        page = result.pagination.current_page,
        limit = result.pagination.items_per_page,
        total_items = result.pagination.total_items,
        returned = result.data.len(),
        "Listed automations",
    );

    Ok(Json(result))
}
