//! Parent-scoped child lists: lessons inside a course, questions inside a
//! lesson. Each level owns its list, its modal state, and its loading flag,
//! and refreshing it never touches the parent or any sibling level.

use serde::de::DeserializeOwned;

use crate::api::ApiGateway;
use crate::notice::Notices;

use super::pagination::pagination_window;
use super::list::PAGE_WINDOW;
use super::seq::RequestSeq;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Loading,
    Loaded,
}

#[derive(Debug)]
pub struct NestedList<T> {
    page_size: u32,
    parent_id: Option<String>,
    list_path: Option<String>,
    state: PanelState,
    items: Vec<T>,
    current_page: u32,
    total_pages: u32,
    total_count: i64,
    seq: RequestSeq,
}

impl<T: DeserializeOwned + Send> NestedList<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            parent_id: None,
            list_path: None,
            state: PanelState::Closed,
            items: Vec::new(),
            current_page: 1,
            total_pages: 0,
            total_count: 0,
            seq: RequestSeq::new(),
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != PanelState::Closed
    }

    pub fn is_loading(&self) -> bool {
        self.state == PanelState::Loading
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
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

    pub fn page_numbers(&self) -> Vec<u32> {
        pagination_window(self.current_page, self.total_pages, PAGE_WINDOW)
    }

    /// Record the parent, open the panel, and fetch the first page of its
    /// children.
    pub async fn open<G: ApiGateway>(
        &mut self,
        api: &G,
        notices: &Notices,
        parent_id: impl Into<String>,
        list_path: impl Into<String>,
    ) -> bool {
        self.parent_id = Some(parent_id.into());
        self.list_path = Some(list_path.into());
        self.items.clear();
        self.current_page = 1;
        self.total_pages = 0;
        self.total_count = 0;
        self.fetch(api, notices, 1).await
    }

    /// Close the panel and drop the child list and parent reference. The
    /// parent list is untouched.
    pub fn close(&mut self) {
        self.parent_id = None;
        self.list_path = None;
        self.items.clear();
        self.current_page = 1;
        self.total_pages = 0;
        self.total_count = 0;
        self.state = PanelState::Closed;
    }

    async fn fetch<G: ApiGateway>(&mut self, api: &G, notices: &Notices, page: u32) -> bool {
        let Some(path) = self.list_path.clone() else {
            return false;
        };

        self.state = PanelState::Loading;
        let token = self.seq.issue();
        let query = [
            ("Page", page.to_string()),
            ("PageSize", self.page_size.to_string()),
        ];
        let outcome = api.fetch_page::<T>(&path, &query).await;

        if !self.seq.is_current(token) {
            tracing::debug!(page, "discarding stale scoped-list response");
            return false;
        }
        if self.state == PanelState::Closed {
            // closed while the request was in flight; stay closed
            return false;
        }

        match outcome {
            Ok(result) => {
                self.items = result.items;
                self.total_pages = result.total_pages;
                self.total_count = result.total_count;
                self.current_page = page;
                self.state = PanelState::Loaded;
                true
            }
            Err(e) => {
                // back to Loaded with the previous data intact, never a dead
                // error state
                self.state = PanelState::Loaded;
                if !e.is_unauthorized() {
                    notices.error(e.user_message());
                }
                false
            }
        }
    }

    /// Re-fetch this level's current page, same parent scope.
    pub async fn refresh<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        let page = self.current_page;
        self.fetch(api, notices, page).await
    }

    pub async fn reload_first<G: ApiGateway>(&mut self, api: &G, notices: &Notices) -> bool {
        self.fetch(api, notices, 1).await
    }

    pub async fn change_page<G: ApiGateway>(
        &mut self,
        api: &G,
        notices: &Notices,
        page: u32,
    ) -> bool {
        if page < 1 || page > self.total_pages || page == self.current_page {
            return false;
        }
        self.fetch(api, notices, page).await
    }

    /// Same step-back rule as the top-level lists.
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
        self.fetch(api, notices, page).await
    }
}
