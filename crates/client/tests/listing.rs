use std::collections::VecDeque;
use std::sync::Mutex;

use assert_matches::assert_matches;
use async_trait::async_trait;
use tokio::sync::Notify;

use autolist_client::error::ClientError;
use autolist_client::gateway::AutomationsApi;
use autolist_client::listing::Listing;
use autolist_core::automation::{Automation, AutomationField};
use autolist_core::pipeline::{process, PageResult};
use autolist_core::query::QueryDescriptor;

type Reply = Result<PageResult<Automation>, ClientError>;

/// Answers queries from a script and records what it was asked.
#[derive(Default)]
struct ScriptedApi {
    replies: Mutex<VecDeque<Reply>>,
    queries: Mutex<Vec<QueryDescriptor>>,
}

impl ScriptedApi {
    fn with(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            queries: Mutex::default(),
        }
    }

    fn queries(&self) -> Vec<QueryDescriptor> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AutomationsApi for ScriptedApi {
    async fn fetch_page(&self, query: &QueryDescriptor) -> Reply {
        self.queries.lock().unwrap().push(query.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(page_of(&[])))
    }
}

/// Holds every page-1 request until `release` is notified; other pages
/// answer at once. Each answer names the page it was asked for.
#[derive(Default)]
struct GatedApi {
    held: Notify,
    release: Notify,
}

#[async_trait]
impl AutomationsApi for GatedApi {
    async fn fetch_page(&self, query: &QueryDescriptor) -> Reply {
        if query.page() == 1 {
            self.held.notify_one();
            self.release.notified().await;
        }
        Ok(page_of(&[&format!("page {}", query.page())]))
    }
}

fn record(id: &str, name: &str) -> Automation {
    Automation {
        id: id.into(),
        name: Some(name.into()),
        kind: None,
        creation_time: None,
        status: None,
    }
}

fn page_of(names: &[&str]) -> PageResult<Automation> {
    let records = names
        .iter()
        .enumerate()
        .map(|(i, name)| record(&i.to_string(), name))
        .collect();
    process(records, &QueryDescriptor::default())
}

fn on_page(page: u64) -> QueryDescriptor {
    let mut query = QueryDescriptor::default();
    query.set_page(page).unwrap();
    query
}

fn shown_names<A: AutomationsApi>(listing: &Listing<A>) -> Vec<String> {
    listing
        .page()
        .map(|p| p.data.iter().filter_map(|r| r.name.clone()).collect())
        .unwrap_or_default()
}

fn server_error(status: u16, message: &str) -> ClientError {
    ClientError::Server {
        status,
        message: Some(message.into()),
    }
}

#[tokio::test]
async fn load_shows_fetched_page() {
    let listing = Listing::new(ScriptedApi::with(vec![Ok(page_of(&["a", "b"]))]));
    assert!(!listing.is_loading());

    assert!(listing.load(&QueryDescriptor::default()).await);

    assert_eq!(shown_names(&listing), ["a", "b"]);
    assert!(!listing.is_loading());
    assert_eq!(listing.error(), None);
    assert_eq!(listing.api().queries(), [QueryDescriptor::default()]);
}

#[tokio::test]
async fn overlapping_loads_keep_the_newest_result() {
    let listing = Listing::new(GatedApi::default());
    let older = on_page(1);
    let newer = on_page(2);

    let (older_applied, newer_applied) = tokio::join!(listing.load(&older), async {
        // Start only once the older request is in flight.
        listing.api().held.notified().await;
        let applied = listing.load(&newer).await;
        listing.api().release.notify_one();
        applied
    });

    assert!(newer_applied);
    assert!(!older_applied, "older response arrived last and must be dropped");
    assert_eq!(shown_names(&listing), ["page 2"]);
    assert!(!listing.is_loading());
}

#[tokio::test]
async fn page_and_filter_options_load_together() {
    let listing = Listing::new(ScriptedApi::with(vec![
        Ok(page_of(&["shown"])),
        Ok(page_of(&["b", "a"])),
    ]));

    let query = QueryDescriptor::default();
    let (applied, options) = tokio::join!(
        listing.load(&query),
        listing.load_filter_options()
    );

    assert!(applied);
    assert!(listing.page().is_some());
    assert!(!options.is_empty());
    assert_eq!(listing.api().queries().len(), 2);
}

#[test]
fn last_request_wins() {
    let listing = Listing::new(ScriptedApi::default());

    let first = listing.begin();
    let second = listing.begin();
    assert!(listing.is_loading());

    assert!(listing.finish(second, Ok(page_of(&["newer"]))));
    assert!(!listing.finish(first, Ok(page_of(&["older"]))));

    assert_eq!(shown_names(&listing), ["newer"]);
    assert!(!listing.is_loading());
}

#[test]
fn stale_response_does_not_end_loading() {
    let listing = Listing::new(ScriptedApi::default());

    let first = listing.begin();
    let second = listing.begin();
    assert!(!listing.finish(first, Err(server_error(500, "boom"))));

    assert!(listing.is_loading());
    assert_eq!(listing.error(), None);
    assert!(listing.finish(second, Ok(page_of(&["x"]))));
}

#[tokio::test]
async fn failure_keeps_previous_page_and_reports_message() {
    let listing = Listing::new(ScriptedApi::with(vec![
        Ok(page_of(&["kept"])),
        Err(server_error(400, "Invalid sort order. Must be \"asc\" or \"desc\"")),
    ]));

    listing.load(&QueryDescriptor::default()).await;
    listing.load(&QueryDescriptor::default()).await;

    assert_eq!(
        listing.error().as_deref(),
        Some("Invalid sort order. Must be \"asc\" or \"desc\"")
    );
    assert_eq!(shown_names(&listing), ["kept"]);
    assert!(!listing.is_loading());
}

#[tokio::test]
async fn new_request_clears_previous_error() {
    let listing = Listing::new(ScriptedApi::with(vec![Err(ClientError::Server {
        status: 500,
        message: None,
    })]));
    listing.load(&QueryDescriptor::default()).await;
    assert_eq!(
        listing.error().as_deref(),
        Some("Request failed with status code 500")
    );

    let ticket = listing.begin();
    assert_eq!(listing.error(), None);
    assert_eq!(ticket.id(), 2);
}

#[tokio::test]
async fn filter_options_are_fetched_once() {
    let listing = Listing::new(ScriptedApi::with(vec![Ok(page_of(&["b", "a", "b"]))]));

    assert_eq!(listing.load_filter_options().await.names, ["a", "b"]);
    assert_eq!(listing.load_filter_options().await.names, ["a", "b"]);
    assert_eq!(listing.filter_options().names, ["a", "b"]);

    let queries = listing.api().queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].page(), 1);
    assert_eq!(queries[0].limit(), 50_000);
    assert!(queries[0].filters().is_empty());
}

#[tokio::test]
async fn failed_filter_options_stay_empty_and_retry() {
    let listing = Listing::new(ScriptedApi::with(vec![
        Err(server_error(500, "File not found")),
        Ok(page_of(&["only"])),
    ]));

    assert!(listing.load_filter_options().await.is_empty());
    assert_eq!(listing.error(), None, "option failures are not surfaced");

    let options = listing.load_filter_options().await;
    assert_eq!(options.options_for(AutomationField::Name), ["only"]);
    assert_eq!(listing.api().queries().len(), 2);
}

#[tokio::test]
async fn filter_options_do_not_touch_the_page() {
    let listing = Listing::new(ScriptedApi::with(vec![Ok(page_of(&["all"]))]));
    listing.load_filter_options().await;

    assert_matches!(listing.page(), None);
    assert!(!listing.is_loading());
}
