use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Filter value meaning "no filter applied"
pub const ALL_FILTER: &str = "All";

/// Parameters of one list fetch. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    /// Ordered so serialization is stable regardless of insertion order
    pub filters: BTreeMap<String, String>,
}

impl ListParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            search: None,
            filters: BTreeMap::new(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Search text that will actually be sent; blank counts as none
    pub fn effective_search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Filters that restrict the result set ("All" and blank values excluded)
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, value)| !value.is_empty() && value.as_str() != ALL_FILTER)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn is_narrowed(&self) -> bool {
        self.effective_search().is_some() || self.active_filters().next().is_some()
    }

    /// Outgoing query string pairs
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = self.effective_search() {
            pairs.push(("search".to_string(), search.to_string()));
        }
        pairs.extend(
            self.active_filters()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        );
        pairs
    }

    /// Key segments; parameter tuples that send the same query share segments
    pub fn cache_segments(&self) -> Vec<String> {
        let mut segments = vec![
            self.page.to_string(),
            self.limit.to_string(),
            self.effective_search().unwrap_or_default().to_string(),
        ];
        for (key, value) in self.active_filters() {
            segments.push(key.to_string());
            segments.push(value.to_string());
        }
        segments
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(1, crate::config::config().listing.default_page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn all_filter_is_omitted() {
        let params = ListParams::new(1, 10)
            .with_filter("status", "All")
            .with_filter("plan", "premium");
        assert_eq!(params.to_query_pairs(), expected(&[("page", "1"), ("limit", "10"), ("plan", "premium")]));
    }

    #[test]
    fn blank_search_is_not_sent() {
        let params = ListParams::new(2, 25).with_search("   ");
        assert_eq!(params.to_query_pairs(), expected(&[("page", "2"), ("limit", "25")]));
        assert!(!params.is_narrowed());

        let params = ListParams::new(2, 25).with_search(" acme ");
        assert_eq!(params.to_query_pairs(), expected(&[("page", "2"), ("limit", "25"), ("search", "acme")]));
        assert!(params.is_narrowed());
    }

    #[test]
    fn page_and_limit_are_at_least_one() {
        let params = ListParams::new(0, 0);
        assert_eq!((params.page, params.limit), (1, 1));
    }

    #[test]
    fn filter_order_does_not_change_segments() {
        let a = ListParams::new(1, 10).with_filter("status", "active").with_filter("plan", "pro");
        let b = ListParams::new(1, 10).with_filter("plan", "pro").with_filter("status", "active");
        assert_eq!(a.cache_segments(), b.cache_segments());
    }

    #[test]
    fn distinct_tuples_have_distinct_segments() {
        let base = ListParams::new(1, 10);
        let variants = [
            base.clone(),
            ListParams::new(2, 10),
            ListParams::new(1, 20),
            base.clone().with_search("a"),
            base.clone().with_filter("status", "active"),
            base.clone().with_filter("status", "inactive"),
            base.clone().with_filter("plan", "active"),
        ];
        for (i, a) in variants.iter().enumerate() {
            for b in variants.iter().skip(i + 1) {
                assert_ne!(a.cache_segments(), b.cache_segments(), "{:?} vs {:?}", a, b);
            }
        }
    }
}
