//! Paginated select adapter
//!
//! Bridges a remote page fetcher to a search-as-you-type, infinite-scroll
//! select. All state lives behind `Cell`/`RefCell` so the adapter can be
//! shared by reference between concurrently polled futures on one thread;
//! no borrow is held across an `.await`.
//!
//! Every request is tagged with the generation and search term active when
//! it was issued. A newer `search` or a `cancel` bumps the generation, and a
//! completion whose tag no longer matches is dropped.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::time::Duration;

use super::error::FetchError;
use super::schema::{PaginationConfig, SelectOption};

/// Default debounce applied to `search`
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// One page request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageQuery {
    pub resource: String,
    /// 1-based page number
    pub page: u32,
    pub page_size: usize,
    pub search: String,
}

/// One page of options returned by the server
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<SelectOption>,
    /// Total number of matching items, when the server reports it
    #[serde(default)]
    pub total: Option<u64>,
    /// Explicit "more pages" flag, when the server reports it
    #[serde(default)]
    pub has_more: Option<bool>,
}

/// Remote list source of a paginated select
#[async_trait(?Send)]
pub trait PageFetcher {
    async fn fetch(&self, query: PageQuery) -> Result<Page, FetchError>;
}

/// Timer used for the search debounce
#[async_trait(?Send)]
pub trait Delay {
    async fn sleep(&self, duration: Duration);
}

/// Debounce timer on the tokio runtime
#[cfg(feature = "native")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioDelay;

#[cfg(feature = "native")]
#[async_trait(?Send)]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Observable state of one paginated select
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaginationState {
    pub items: Vec<SelectOption>,
    pub is_loading: bool,
    pub has_more: bool,
    /// Last page applied, 0 before the first load
    pub current_page: u32,
    /// Term the displayed items were fetched with
    pub search_term: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Apply {
    Replace,
    Append,
}

pub struct PaginatedSelectAdapter<F, D> {
    fetcher: F,
    delay: D,
    config: PaginationConfig,
    debounce: Duration,
    state: RefCell<PaginationState>,
    generation: Cell<u64>,
    loaded: Cell<bool>,
}

impl<F: PageFetcher, D: Delay> PaginatedSelectAdapter<F, D> {
    pub fn new(fetcher: F, delay: D, config: PaginationConfig) -> Self {
        Self {
            fetcher,
            delay,
            config,
            debounce: DEFAULT_DEBOUNCE,
            state: RefCell::new(PaginationState {
                has_more: true,
                ..Default::default()
            }),
            generation: Cell::new(0),
            loaded: Cell::new(false),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    pub fn state(&self) -> PaginationState {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<SelectOption> {
        self.state.borrow().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Fetch page 1 with an empty search, unless already loaded
    pub async fn load_initial(&self) {
        if self.loaded.get() || self.is_loading() {
            return;
        }
        let generation = self.generation.get();
        self.fetch_page(1, String::new(), generation, Apply::Replace)
            .await;
    }

    /// Append the next page for the current term
    pub async fn load_more(&self) {
        let (page, term) = {
            let state = self.state.borrow();
            if state.is_loading || !state.has_more {
                return;
            }
            (state.current_page + 1, state.search_term.clone())
        };
        let generation = self.generation.get();
        self.fetch_page(page, term, generation, Apply::Append).await;
    }

    /// Debounced search; replaces the item list with page 1 for `term`
    pub async fn search(&self, term: impl Into<String>) {
        let term = term.into();
        let generation = self.bump();

        self.delay.sleep(self.debounce).await;
        if self.generation.get() != generation {
            tracing::debug!(resource = %self.config.resource, term = %term, "Search superseded during debounce");
            return;
        }

        self.fetch_page(1, term, generation, Apply::Replace).await;
    }

    /// Drop any pending debounce and ignore in-flight completions
    pub fn cancel(&self) {
        self.bump();
        self.state.borrow_mut().is_loading = false;
    }

    fn bump(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    async fn fetch_page(&self, page: u32, term: String, generation: u64, apply: Apply) {
        self.state.borrow_mut().is_loading = true;

        let query = PageQuery {
            resource: self.config.resource.clone(),
            page,
            page_size: self.config.page_size,
            search: term.clone(),
        };
        tracing::debug!(resource = %query.resource, page, search = %term, "Fetching options page");
        let result = self.fetcher.fetch(query).await;

        if self.generation.get() != generation {
            tracing::debug!(resource = %self.config.resource, page, search = %term, "Dropping stale page response");
            return;
        }

        let mut state = self.state.borrow_mut();
        if apply == Apply::Append && state.search_term != term {
            tracing::debug!(resource = %self.config.resource, search = %term, "Dropping page for a replaced search term");
            state.is_loading = false;
            return;
        }
        state.is_loading = false;

        match result {
            Ok(Page {
                items,
                total,
                has_more,
            }) => {
                let returned = items.len();
                match apply {
                    Apply::Replace => state.items = items,
                    Apply::Append => state.items.extend(items),
                }
                let loaded = state.items.len();
                state.current_page = page;
                state.search_term = term;
                state.has_more =
                    compute_has_more(total, has_more, returned, loaded, self.config.page_size);
                if page == 1 {
                    self.loaded.set(true);
                }
            }
            Err(e) => {
                tracing::warn!(resource = %self.config.resource, page, "Failed to fetch options: {}", e);
                state.has_more = false;
            }
        }
    }
}

/// A short or empty page always ends the list. Otherwise the explicit flag
/// wins, then the total count, then the full-page heuristic.
fn compute_has_more(
    total: Option<u64>,
    flag: Option<bool>,
    returned: usize,
    loaded: usize,
    page_size: usize,
) -> bool {
    if returned == 0 || returned < page_size {
        return false;
    }
    if let Some(flag) = flag {
        return flag;
    }
    if let Some(total) = total {
        return (loaded as u64) < total;
    }
    returned == page_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use tokio::sync::Notify;

    fn option(n: usize, term: &str) -> SelectOption {
        SelectOption::new(format!("{}-{}", term, n), format!("{} {}", term, n))
    }

    /// Serves `total` items per term, slowing down terms listed in `slow`
    struct FakeFetcher {
        total: usize,
        with_total: bool,
        slow: Vec<(String, Duration)>,
        calls: RefCell<Vec<PageQuery>>,
        gate: Option<Rc<Notify>>,
        fail: bool,
        reported_total: Option<u64>,
    }

    impl FakeFetcher {
        fn new(total: usize) -> Self {
            Self {
                total,
                with_total: false,
                slow: Vec::new(),
                calls: RefCell::new(Vec::new()),
                gate: None,
                fail: false,
                reported_total: None,
            }
        }
    }

    #[async_trait(?Send)]
    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, query: PageQuery) -> Result<Page, FetchError> {
            self.calls.borrow_mut().push(query.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if let Some((_, delay)) = self.slow.iter().find(|(t, _)| *t == query.search) {
                tokio::time::sleep(*delay).await;
            }
            if self.fail {
                return Err(FetchError::Network("connection refused".into()));
            }
            let start = (query.page as usize - 1) * query.page_size;
            let end = (start + query.page_size).min(self.total);
            let items = (start..end.max(start)).map(|n| option(n, &query.search)).collect();
            Ok(Page {
                items,
                total: self
                    .reported_total
                    .or(self.with_total.then_some(self.total as u64)),
                has_more: None,
            })
        }
    }

    struct NoDelay;

    #[async_trait(?Send)]
    impl Delay for NoDelay {
        async fn sleep(&self, _duration: Duration) {
            tokio::task::yield_now().await;
        }
    }

    fn config(page_size: usize) -> PaginationConfig {
        PaginationConfig {
            resource: "categories".into(),
            page_size,
            all_label: "All".into(),
        }
    }

    #[tokio::test]
    async fn test_load_initial_then_more() {
        let adapter = PaginatedSelectAdapter::new(FakeFetcher::new(25), NoDelay, config(10));

        adapter.load_initial().await;
        adapter.load_initial().await;
        assert_eq!(adapter.fetcher.calls.borrow().len(), 1);
        assert_eq!(adapter.items().len(), 10);
        assert!(adapter.state().has_more);

        adapter.load_more().await;
        adapter.load_more().await;
        let state = adapter.state();
        assert_eq!(state.items.len(), 25);
        assert_eq!(state.current_page, 3);
        assert!(!state.has_more);

        adapter.load_more().await;
        assert_eq!(adapter.fetcher.calls.borrow().len(), 3);
    }

    #[tokio::test]
    async fn test_short_page_ends_list_despite_stale_total() {
        let mut fetcher = FakeFetcher::new(15);
        fetcher.reported_total = Some(100);
        let adapter = PaginatedSelectAdapter::new(fetcher, NoDelay, config(10));

        adapter.load_initial().await;
        assert!(adapter.state().has_more);
        adapter.load_more().await;
        assert_eq!(adapter.items().len(), 15);
        assert!(!adapter.state().has_more);

        adapter.load_more().await;
        assert_eq!(adapter.fetcher.calls.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_total_count_avoids_extra_fetch() {
        let mut fetcher = FakeFetcher::new(20);
        fetcher.with_total = true;
        let adapter = PaginatedSelectAdapter::new(fetcher, NoDelay, config(10));

        adapter.load_initial().await;
        adapter.load_more().await;
        assert!(!adapter.state().has_more);

        adapter.load_more().await;
        assert_eq!(adapter.fetcher.calls.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_load_more_while_loading_is_noop() {
        let gate = Rc::new(Notify::new());
        let mut fetcher = FakeFetcher::new(30);
        fetcher.gate = Some(gate.clone());
        let adapter = PaginatedSelectAdapter::new(fetcher, NoDelay, config(10));

        tokio::join!(adapter.load_initial(), async {
            assert!(adapter.is_loading());
            adapter.load_more().await;
            gate.notify_one();
        });

        assert_eq!(adapter.fetcher.calls.borrow().len(), 1);
        assert_eq!(adapter.items().len(), 10);
    }

    #[tokio::test]
    async fn test_search_replaces_items() {
        let adapter = PaginatedSelectAdapter::new(FakeFetcher::new(15), NoDelay, config(10));
        adapter.load_initial().await;
        adapter.load_more().await;
        assert_eq!(adapter.items().len(), 15);

        adapter.search("yoga").await;
        let state = adapter.state();
        assert_eq!(state.items.len(), 10);
        assert_eq!(state.search_term, "yoga");
        assert_eq!(state.current_page, 1);
        assert!(state.items.iter().all(|o| o.value.starts_with("yoga-")));
    }

    #[tokio::test]
    async fn test_stale_search_response_dropped() {
        let mut fetcher = FakeFetcher::new(5);
        fetcher.slow = vec![("paris".to_string(), Duration::from_millis(40))];
        let adapter = PaginatedSelectAdapter::new(fetcher, NoDelay, config(10));

        tokio::join!(adapter.search("paris"), async {
            // let the paris request get in flight first
            tokio::time::sleep(Duration::from_millis(5)).await;
            adapter.search("london").await;
        });

        let calls: Vec<_> = adapter.fetcher.calls.borrow().iter().map(|q| q.search.clone()).collect();
        assert_eq!(calls, vec!["paris", "london"]);
        let state = adapter.state();
        assert_eq!(state.search_term, "london");
        assert!(state.items.iter().all(|o| o.value.starts_with("london-")));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_debounce_skips_superseded_terms() {
        let adapter = PaginatedSelectAdapter::new(FakeFetcher::new(5), TokioDelay, config(10))
            .with_debounce(Duration::from_millis(20));

        tokio::join!(adapter.search("par"), adapter.search("paris"));

        let calls: Vec<_> = adapter.fetcher.calls.borrow().iter().map(|q| q.search.clone()).collect();
        assert_eq!(calls, vec!["paris"]);
        assert_eq!(adapter.state().search_term, "paris");
    }

    #[tokio::test]
    async fn test_cancel_ignores_in_flight_completion() {
        let gate = Rc::new(Notify::new());
        let mut fetcher = FakeFetcher::new(5);
        fetcher.gate = Some(gate.clone());
        let adapter = PaginatedSelectAdapter::new(fetcher, NoDelay, config(10));

        tokio::join!(adapter.load_initial(), async {
            adapter.cancel();
            gate.notify_one();
        });

        let state = adapter.state();
        assert!(state.items.is_empty());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_fetch_failure_stops_pagination() {
        let mut fetcher = FakeFetcher::new(30);
        fetcher.fail = true;
        let adapter = PaginatedSelectAdapter::new(fetcher, NoDelay, config(10));

        adapter.load_initial().await;
        let state = adapter.state();
        assert!(!state.has_more);
        assert!(!state.is_loading);

        adapter.load_more().await;
        assert_eq!(adapter.fetcher.calls.borrow().len(), 1);
    }

    #[test]
    fn test_has_more_precedence() {
        assert!(!compute_has_more(Some(100), Some(false), 10, 10, 10));
        assert!(!compute_has_more(Some(20), None, 10, 20, 10));
        assert!(compute_has_more(Some(21), None, 10, 20, 10));
        assert!(compute_has_more(None, None, 10, 20, 10));
        assert!(!compute_has_more(None, None, 4, 14, 10));

        // Stale totals and optimistic flags cannot keep an exhausted list open
        assert!(!compute_has_more(Some(100), None, 0, 20, 10));
        assert!(!compute_has_more(None, Some(true), 0, 20, 10));
        assert!(!compute_has_more(Some(100), Some(true), 3, 23, 10));
    }
}
