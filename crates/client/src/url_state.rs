//! Keeps the listing query and the browser URL in step.
//!
//! The URL is reached through a [`HistoryPort`] so the synchronizer can run
//! against a real browser history or against [`MemoryHistory`]. Reading a URL
//! is lenient (bad fields fall back to defaults); writing always goes through
//! the validated [`QueryDescriptor`], so the URL never holds a query the
//! server would reject.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use autolist_core::automation::AutomationField;
use autolist_core::query::{collect_params, QueryDescriptor, SortOrder};

use crate::error::ClientError;

// ---------------------------------------------------------------------------
// Query string codec
// ---------------------------------------------------------------------------

/// Encode a query as `application/x-www-form-urlencoded`, without the `?`.
pub fn encode_query(query: &QueryDescriptor) -> Result<String, ClientError> {
    Ok(serde_urlencoded::to_string(query.to_query_pairs())?)
}

/// Encode a query as a location search string (`?page=1&limit=50`).
pub fn to_search(query: &QueryDescriptor) -> Result<String, ClientError> {
    Ok(format!("?{}", encode_query(query)?))
}

/// Parse a location search string, with or without its leading `?`.
///
/// Never fails: an undecodable string yields the default query, and each
/// invalid field falls back to its default. When a key repeats, the first
/// value wins.
pub fn decode_query(search: &str) -> QueryDescriptor {
    let raw = search.strip_prefix('?').unwrap_or(search);

    let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(raw) {
        Ok(pairs) => pairs,
        Err(err) => {
            tracing::warn!(error = %err, search, "Undecodable query string, using defaults");
            Vec::new()
        }
    };

    QueryDescriptor::from_params_lenient(&collect_params(pairs))
}

// ---------------------------------------------------------------------------
// History port
// ---------------------------------------------------------------------------

/// Navigable location the query is mirrored into.
pub trait HistoryPort {
    /// Current search string, including the leading `?` when non-empty.
    fn location_search(&self) -> String;

    /// Push a new history entry without reloading. Does not notify
    /// subscribers.
    fn push_search(&self, search: &str);

    /// Call `listener` after every back/forward navigation.
    fn subscribe(&self, listener: Box<dyn Fn()>) -> Subscription;
}

/// Handle for a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

type Listener = Rc<dyn Fn()>;

struct HistoryInner {
    entries: Vec<String>,
    index: usize,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

/// In-memory session history with back/forward navigation.
///
/// Clones share the same history.
#[derive(Clone)]
pub struct MemoryHistory {
    inner: Rc<RefCell<HistoryInner>>,
}

impl MemoryHistory {
    pub fn new(initial_search: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HistoryInner {
                entries: vec![initial_search.to_string()],
                index: 0,
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
        }
    }

    /// Step back one entry. Returns `false` at the start of history.
    pub fn back(&self) -> bool {
        self.go(-1)
    }

    /// Step forward one entry. Returns `false` at the end of history.
    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.inner.borrow().entries.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn go(&self, delta: isize) -> bool {
        // Listeners run after the borrow ends; they may read the location.
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            let Some(target) = inner
                .index
                .checked_add_signed(delta)
                .filter(|i| *i < inner.entries.len())
            else {
                return false;
            };
            inner.index = target;
            inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
        };

        for listener in listeners {
            listener();
        }
        true
    }
}

impl HistoryPort for MemoryHistory {
    fn location_search(&self) -> String {
        let inner = self.inner.borrow();
        inner.entries[inner.index].clone()
    }

    fn push_search(&self, search: &str) {
        let mut inner = self.inner.borrow_mut();
        let keep = inner.index + 1;
        inner.entries.truncate(keep);
        inner.entries.push(search.to_string());
        inner.index = keep;
    }

    fn subscribe(&self, listener: Box<dyn Fn()>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, Rc::from(listener)));
            id
        };

        let weak: Weak<RefCell<HistoryInner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Synchronizer
// ---------------------------------------------------------------------------

/// A user-driven change to the listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryUpdate {
    /// Sort by `field` (or clear sorting with `None`).
    Sort {
        field: Option<AutomationField>,
        order: SortOrder,
    },
    /// Set or clear one column filter.
    Filter {
        field: AutomationField,
        value: Option<String>,
    },
    ClearFilters,
    Page(u64),
    PageSize(u32),
}

impl QueryUpdate {
    /// Sorting and filtering change the result set, so they start over at
    /// page 1.
    pub fn resets_page(&self) -> bool {
        matches!(
            self,
            Self::Sort { .. } | Self::Filter { .. } | Self::ClearFilters
        )
    }

    fn apply(&self, query: &mut QueryDescriptor) -> Result<(), ClientError> {
        match self {
            Self::Sort { field, order } => {
                query.set_sort(field.map(|f| f.as_str().to_string()), *order);
            }
            Self::Filter { field, value } => query.set_filter(*field, value.as_deref()),
            Self::ClearFilters => query.clear_filters(),
            Self::Page(page) => query.set_page(*page)?,
            Self::PageSize(limit) => query.set_limit(*limit)?,
        }
        if self.resets_page() {
            query.set_page(1)?;
        }
        Ok(())
    }
}

/// Mirrors the listing query into a [`HistoryPort`] and back.
///
/// Between calls the URL and the in-memory query always agree. A write is
/// synchronous and holds `&mut self`, so a port that notifies listeners while
/// pushing cannot feed the write back into the synchronizer; when shared via
/// [`watch_navigation`], such re-entrant notifications find the synchronizer
/// already borrowed and are dropped.
pub struct UrlStateSync<P: HistoryPort> {
    port: P,
    state: QueryDescriptor,
}

impl<P: HistoryPort> UrlStateSync<P> {
    /// Read the current location into the initial query.
    pub fn mount(port: P) -> Self {
        let state = decode_query(&port.location_search());
        tracing::debug!(?state, "Mounted URL state");
        Self { port, state }
    }

    /// The query the listing should currently show.
    pub fn read(&self) -> &QueryDescriptor {
        &self.state
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Merge `update` into the current query and push the result as a new
    /// history entry.
    ///
    /// Returns the query to request. A rejected update leaves both the
    /// state and the URL untouched.
    pub fn update(&mut self, update: QueryUpdate) -> Result<QueryDescriptor, ClientError> {
        let mut next = self.state.clone();
        update.apply(&mut next)?;
        tracing::debug!(?update, "Applying query update");
        self.write(next)?;
        Ok(self.state.clone())
    }

    /// Replace the whole query and push it as a new history entry.
    pub fn write(&mut self, query: QueryDescriptor) -> Result<(), ClientError> {
        let search = to_search(&query)?;

        self.state = query;
        self.port.push_search(&search);

        tracing::debug!(%search, "Pushed URL state");
        Ok(())
    }

    /// Header click: ascending on a new column, flipping to descending when
    /// the column is already sorted ascending.
    pub fn toggle_sort(&mut self, field: AutomationField) -> Result<QueryDescriptor, ClientError> {
        let same_column = self.state.sort_by() == Some(field.as_str());
        let order = if same_column && self.state.sort_order() == SortOrder::Asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        self.update(QueryUpdate::Sort {
            field: Some(field),
            order,
        })
    }

    /// React to back/forward navigation by re-reading the location.
    ///
    /// Never pushes. Returns the new query when it differs from the old one.
    pub fn handle_navigation(&mut self) -> Option<QueryDescriptor> {
        let next = decode_query(&self.port.location_search());
        if next == self.state {
            return None;
        }
        tracing::debug!(state = ?next, "Restored URL state from navigation");
        self.state = next;
        Some(self.state.clone())
    }
}

/// Subscribe `sync` to navigation on its port, calling `on_change` with the
/// restored query whenever back/forward changes it.
pub fn watch_navigation<P>(
    sync: &Rc<RefCell<UrlStateSync<P>>>,
    on_change: impl Fn(&QueryDescriptor) + 'static,
) -> Subscription
where
    P: HistoryPort + 'static,
{
    let weak = Rc::downgrade(sync);
    let listener = move || {
        let Some(sync) = weak.upgrade() else {
            return;
        };
        // Already borrowed means the port notified from inside a write.
        let restored = match sync.try_borrow_mut() {
            Ok(mut sync) => sync.handle_navigation(),
            Err(_) => None,
        };
        if let Some(query) = restored {
            on_change(&query);
        }
    };
    sync.borrow().port().subscribe(Box::new(listener))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
