//! What the automations table currently shows.
//!
//! Every page request is tagged with a [`Ticket`]. Only the most recently
//! issued ticket may update the view, so a slow response for an old query
//! can never overwrite the result of a newer one.
//!
//! Fetches take `&self` and never hold a lock across an `.await`, so page
//! loads may overlap each other and the one-time filter-option load.

use std::sync::RwLock;

use tracing::{debug, error, warn};

use autolist_core::automation::Automation;
use autolist_core::pipeline::PageResult;
use autolist_core::query::QueryDescriptor;

use crate::columns::FILTER_OPTIONS_LIMIT;
use crate::error::ClientError;
use crate::filter_options::FilterOptions;
use crate::gateway::AutomationsApi;

/// Identifies one issued page request.
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Default)]
struct ViewState {
    latest_ticket: u64,
    page: Option<PageResult<Automation>>,
    error: Option<String>,
    loading: bool,
}

pub struct Listing<A> {
    api: A,
    view: RwLock<ViewState>,
    filter_options: RwLock<FilterOptions>,
}

impl<A: AutomationsApi> Listing<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            view: RwLock::default(),
            filter_options: RwLock::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Start a request. Supersedes every ticket issued before it.
    pub fn begin(&self) -> Ticket {
        let mut view = self.view.write().unwrap_or_else(|e| e.into_inner());
        view.latest_ticket += 1;
        view.loading = true;
        view.error = None;
        Ticket(view.latest_ticket)
    }

    /// Apply a completed request. Returns `false` when `ticket` was
    /// superseded and the result was dropped.
    ///
    /// A failure keeps the last good page and records a user-facing message.
    pub fn finish(&self, ticket: Ticket, result: Result<PageResult<Automation>, ClientError>) -> bool {
        let mut view = self.view.write().unwrap_or_else(|e| e.into_inner());
        if ticket.0 != view.latest_ticket {
            debug!(
                ticket = ticket.0,
                latest = view.latest_ticket,
                "Dropping stale listing response"
            );
            return false;
        }

        view.loading = false;
        match result {
            Ok(page) => {
                view.page = Some(page);
                view.error = None;
            }
            Err(err) => {
                error!(error = %err, "Failed to fetch automations");
                view.error = Some(err.user_message());
            }
        }
        true
    }

    /// Fetch and apply one page. Returns `false` when a newer load started
    /// while this one was in flight.
    pub async fn load(&self, query: &QueryDescriptor) -> bool {
        let ticket = self.begin();
        let result = self.api.fetch_page(query).await;
        self.finish(ticket, result)
    }

    /// Fill the filter dropdowns from the full record set.
    ///
    /// A non-empty cache is kept for the lifetime of the listing and never
    /// refetched. Failures are logged and leave the cache empty so the next
    /// call retries.
    pub async fn load_filter_options(&self) -> FilterOptions {
        let cached = self.filter_options();
        if !cached.is_empty() {
            return cached;
        }

        let mut query = QueryDescriptor::default();
        if let Err(err) = query.set_limit(FILTER_OPTIONS_LIMIT) {
            warn!(error = %err, "Filter option limit rejected");
            return cached;
        }

        let loaded = match self.api.fetch_page(&query).await {
            Ok(page) => {
                debug!(records = page.data.len(), "Loaded filter options");
                FilterOptions::from_records(&page.data)
            }
            Err(err) => {
                warn!(error = %err, "Failed to load filter options");
                return cached;
            }
        };

        let mut options = self.filter_options.write().unwrap_or_else(|e| e.into_inner());
        if options.is_empty() {
            *options = loaded;
        }
        options.clone()
    }

    pub fn page(&self) -> Option<PageResult<Automation>> {
        self.view.read().unwrap_or_else(|e| e.into_inner()).page.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.view.read().unwrap_or_else(|e| e.into_inner()).error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.view.read().unwrap_or_else(|e| e.into_inner()).loading
    }

    pub fn filter_options(&self) -> FilterOptions {
        self.filter_options
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
