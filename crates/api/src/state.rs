use std::sync::Arc;

use autolist_core::pipeline::RecordSource;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the source sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Where the listing reads its records from on every request.
    pub source: Arc<dyn RecordSource>,
}

impl AppState {
    pub fn new(source: impl RecordSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}
