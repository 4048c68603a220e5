use std::collections::BTreeMap;

use super::DebouncedSearch;
use crate::error::ApiError;
use crate::query::{ListParams, Page, ALL_FILTER};
use crate::resources::Resource;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded(Page),
    Errored(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Search or filters matched nothing; no call to action
    NoSearchResults,
    /// Nothing exists yet; offer to create the first record
    Onboarding,
}

/// State of one resource list screen.
///
/// `page_index` is zero-based like the paginator widget; the request uses the
/// 1-based page. Changing search or a filter sends the index back to 0.
/// Every load is stamped with a generation and a result that arrives after a
/// newer load has started is dropped.
pub struct ListPage {
    resource: Resource,
    page_index: u32,
    page_size: u32,
    search: String,
    filters: BTreeMap<String, String>,
    state: LoadState,
    generation: u64,
}

impl ListPage {
    pub fn new(resource: Resource, page_size: u32) -> Self {
        Self {
            resource,
            page_index: 0,
            page_size: page_size.max(1),
            search: String::new(),
            filters: BTreeMap::new(),
            state: LoadState::Idle,
            generation: 0,
        }
    }

    /// Declare filter selectors; each starts at "All"
    pub fn with_filters(mut self, keys: &[&str]) -> Self {
        for key in keys {
            self.filters.insert(key.to_string(), ALL_FILTER.to_string());
        }
        self
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn set_page(&mut self, page_index: u32) {
        self.page_index = page_index;
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        let page_size = page_size.max(1);
        if page_size != self.page_size {
            self.page_size = page_size;
            self.page_index = 0;
        }
    }

    /// Apply a debounced search value
    pub fn apply_search(&mut self, search: &str) {
        if search != self.search {
            self.search = search.to_string();
            self.page_index = 0;
        }
    }

    pub fn set_filter(&mut self, key: &str, value: &str) {
        let value = if value.trim().is_empty() { ALL_FILTER } else { value };
        if self.filters.get(key).map(String::as_str) != Some(value) {
            self.filters.insert(key.to_string(), value.to_string());
            self.page_index = 0;
        }
    }

    pub fn params(&self) -> ListParams {
        let mut params = ListParams::new(self.page_index.saturating_add(1), self.page_size);
        if !self.search.is_empty() {
            params.search = Some(self.search.clone());
        }
        params.filters = self.filters.clone();
        params
    }

    /// Enter `Loading` and hand out the generation the result must present
    pub fn begin_load(&mut self) -> (u64, ListParams) {
        self.generation += 1;
        self.state = LoadState::Loading;
        (self.generation, self.params())
    }

    /// Apply a load result. Returns false when the result was stale and dropped.
    pub fn finish_load(&mut self, generation: u64, result: Result<Page, ApiError>) -> bool {
        if generation != self.generation {
            tracing::debug!("dropping stale {} list result", self.resource.kind());
            return false;
        }
        self.state = match result {
            Ok(page) => LoadState::Loaded(page),
            Err(err) => LoadState::Errored(err.message),
        };
        true
    }

    pub async fn refresh(&mut self) -> &LoadState {
        let (generation, params) = self.begin_load();
        let result = self.resource.list(&params).await;
        self.finish_load(generation, result);
        &self.state
    }

    /// Wait for the next settled search text, apply it and reload.
    /// Returns false once the search input has gone away.
    pub async fn follow_search(&mut self, search: &mut DebouncedSearch) -> bool {
        let Some(text) = search.settled().await else {
            return false;
        };
        self.apply_search(text.trim());
        self.refresh().await;
        true
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        match &self.state {
            LoadState::Loaded(page) if page.is_empty() => {
                if self.params().is_narrowed() {
                    Some(EmptyState::NoSearchResults)
                } else {
                    Some(EmptyState::Onboarding)
                }
            }
            _ => None,
        }
    }
}
