use std::fmt;

use super::params::ListParams;

pub const LIST_SCOPE: &str = "list";
pub const DETAIL_SCOPE: &str = "detail";

/// Cache key: `[resource, scope, ...]`.
///
/// List and detail keys of a resource share the resource prefix so one
/// invalidation drops both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn list(resource: &str, params: &ListParams) -> Self {
        let mut segments = vec![resource.to_string(), LIST_SCOPE.to_string()];
        segments.extend(params.cache_segments());
        Self(segments)
    }

    pub fn detail(resource: &str, id: &str) -> Self {
        Self(vec![resource.to_string(), DETAIL_SCOPE.to_string(), id.to_string()])
    }

    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        prefix.len() <= self.0.len() && prefix.iter().zip(&self.0).all(|(p, s)| *p == s)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_and_detail_share_resource_prefix() {
        let list = QueryKey::list("tenant", &ListParams::new(1, 10));
        let detail = QueryKey::detail("tenant", "t1");
        assert_ne!(list, detail);
        assert!(list.starts_with(&["tenant"]));
        assert!(detail.starts_with(&["tenant"]));
        assert!(list.starts_with(&["tenant", LIST_SCOPE]));
        assert!(!detail.starts_with(&["tenant", LIST_SCOPE]));
        assert!(!list.starts_with(&["staff"]));
    }

    #[test]
    fn search_text_cannot_spoof_a_filter() {
        let a = QueryKey::list("order", &ListParams::new(1, 10).with_search("status"));
        let b = QueryKey::list("order", &ListParams::new(1, 10).with_filter("status", ""));
        assert_ne!(a, b);
    }
}
