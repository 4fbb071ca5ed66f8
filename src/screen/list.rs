//! Generic paginated list state, one instance per top-level screen.

use serde::de::DeserializeOwned;

use crate::api::{ApiGateway, ApiResult, Page};
use crate::notice::Notices;

use super::pagination::pagination_window;
use super::seq::{RequestSeq, SeqToken};

pub const PAGE_WINDOW: u32 = 5;

/// Named search fields of a list screen. `query` returns only the fields the
/// user actually filled in; blank values are omitted entirely rather than
/// sent as empty strings.
pub trait FilterSet: Clone + Default {
    fn query(&self) -> Vec<(&'static str, String)>;
}

/// Filterless lists (none currently, but scoped child lists reuse the page
/// mechanics) and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFilter;

impl FilterSet for NoFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// A load that has been issued but whose response has not been applied yet.
/// The token makes late responses detectable: see [`ListController::apply`].
#[derive(Debug, Clone, Copy)]
pub struct PendingLoad {
    token: SeqToken,
    page: u32,
}

#[derive(Debug)]
pub struct ListController<T, F: FilterSet> {
    path: String,
    page_size: u32,
    items: Vec<T>,
    current_page: u32,
    total_pages: u32,
    total_count: i64,
    filters: F,
    loading: bool,
    seq: RequestSeq,
}

impl<T: DeserializeOwned + Send, F: FilterSet> ListController<T, F> {
    pub fn new(path: impl Into<String>, page_size: u32) -> Self {
        Self {
            path: path.into(),
            page_size,
            items: Vec::new(),
            current_page: 1,
            total_pages: 0,
            total_count: 0,
            filters: F::default(),
            loading: false,
            seq: RequestSeq::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The page-number strip for this list.
    pub fn page_numbers(&self) -> Vec<u32> {
        pagination_window(self.current_page, self.total_pages, PAGE_WINDOW)
    }

    pub fn query_for(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("Page", page.to_string()),
            ("PageSize", self.page_size.to_string()),
        ];
        query.extend(self.filters.query());
        query
    }

    /// Issue a load. Each `begin` invalidates the tokens of everything still
    /// in flight for this list.
    pub fn begin(&mut self, page: u32) -> PendingLoad {
        self.loading = true;
        PendingLoad {
            token: self.seq.issue(),
            page,
        }
    }

    /// Apply a load outcome. A stale token (a newer `begin` happened while
    /// this response was in flight) is discarded without touching state. On
    /// success the page replaces items and totals atomically; on failure the
    /// previous state stays and the error is surfaced.
    pub fn apply(
        &mut self,
        pending: PendingLoad,
        outcome: ApiResult<Page<T>>,
        notices: &Notices,
    ) -> bool {
        if !self.seq.is_current(pending.token) {
            tracing::debug!(page = pending.page, "discarding stale list response");
            return false;
        }
        self.loading = false;

        match outcome {
            Ok(page) => {
                self.items = page.items;
                self.total_pages = page.total_pages;
                self.total_count = page.total_count;
                self.current_page = pending.page;
                true
            }
            Err(e) => {
                // 401 already surfaced by the gateway's session-expiry path
                if !e.is_unauthorized() {
                    notices.error(e.user_message());
                }
                false
            }
        }
    }

    pub async fn load<G: ApiGateway>(&mut self, api: &G, notices: &Notices, page: u32) -> bool {
        let pending = self.begin(page);
        let query = self.query_for(page);
        let outcome = api.fetch_page::<T>(&self.path, &query).await;
        self.apply(pending, outcome, notices)
    }

    /// No-op outside `[1, total_pages]` and for the page already shown.
    pub async fn change_page<G: ApiGateway>(
        &mut self,
        api: &G,
        notices: &Notices,
        page: u32,
    ) -> bool {
        if page < 1 || page > self.total_pages || page == self.current_page {
            return false;
        }
        self.load(api, notices, page).await
    }

    /// New filter set ⇒ new result set ⇒ back to page 1.
    pub async fn search<G: ApiGateway>(&mut self, api: &G, notices: &Notices, filters: F) -> bool {
        self.filters = filters;
        self.load(api, notices, 1).await
    }

    pub async fn reset_filters<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        self.filters = F::default();
        self.load(api, notices, 1).await
    }

    pub async fn reload_first<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        self.load(api, notices, 1).await
    }

    pub async fn reload_current<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        self.load(api, notices, self.current_page).await
    }

    /// Reload after a delete: if the removed row was the last one on a page
    /// past the first, step back a page so the user is not left staring at
    /// an empty page.
    pub async fn reload_after_delete<G: ApiGateway>(
        &mut self,
        api: &G,
        notices: &Notices,
    ) -> bool {
        let page = if self.items.len() == 1 && self.current_page > 1 {
            self.current_page - 1
        } else {
            self.current_page
        };
        self.load(api, notices, page).await
    }
}
