use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use serde_json::Value;

use super::key::QueryKey;
use crate::error::ApiError;

type SharedFetch = Shared<BoxFuture<'static, Result<Value, ApiError>>>;

/// Resolved entries kept before the oldest are evicted
pub const DEFAULT_CAPACITY: usize = 256;

enum Entry {
    /// In flight; `id` tells a late completion whether it still owns the slot
    Pending { id: u64, fetch: SharedFetch },
    Ready { id: u64, value: Value },
}

struct Inner {
    entries: HashMap<QueryKey, Entry>,
    /// Resolution order, oldest first; may hold keys that were since dropped
    resolved: VecDeque<(QueryKey, u64)>,
    capacity: usize,
    next_id: u64,
}

impl Inner {
    fn store(&mut self, key: QueryKey, id: u64, value: Value) {
        self.entries.insert(key.clone(), Entry::Ready { id, value });
        self.resolved.push_back((key, id));

        while self.ready_len() > self.capacity {
            let Some((oldest, oldest_id)) = self.resolved.pop_front() else {
                break;
            };
            if matches!(self.entries.get(&oldest), Some(Entry::Ready { id, .. }) if *id == oldest_id) {
                tracing::trace!("evicting {}", oldest);
                self.entries.remove(&oldest);
            }
        }
        if self.resolved.len() > self.capacity * 2 {
            let entries = &self.entries;
            self.resolved
                .retain(|(key, id)| matches!(entries.get(key), Some(Entry::Ready { id: current, .. }) if current == id));
        }
    }

    fn ready_len(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| matches!(entry, Entry::Ready { .. }))
            .count()
    }
}

/// Query cache shared by every resource.
///
/// Concurrent fetches for one key share a single request. Successful results
/// are kept until invalidated or until more than `capacity` results have
/// resolved, at which point the oldest go first; failures are not cached.
/// The lock is only held for map operations, never across an await.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Mutex<Inner>>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: HashMap::new(),
                resolved: VecDeque::new(),
                capacity: capacity.max(1),
                next_id: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub async fn fetch<F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<Value, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>> + Send + 'static,
    {
        let (id, fetch) = {
            let mut inner = self.lock();
            match inner.entries.get(&key) {
                Some(Entry::Ready { value, .. }) => {
                    tracing::trace!("cache hit {}", key);
                    return Ok(value.clone());
                }
                Some(Entry::Pending { id, fetch }) => {
                    tracing::trace!("joining in-flight {}", key);
                    (*id, fetch.clone())
                }
                None => {
                    let id = inner.next_id;
                    inner.next_id += 1;
                    let fetch = fetcher().boxed().shared();
                    inner.entries.insert(key.clone(), Entry::Pending { id, fetch: fetch.clone() });
                    (id, fetch)
                }
            }
        };

        let result = fetch.await;

        let mut inner = self.lock();
        let owns_slot = matches!(inner.entries.get(&key), Some(Entry::Pending { id: current, .. }) if *current == id);
        if owns_slot {
            match &result {
                Ok(value) => inner.store(key, id, value.clone()),
                Err(_) => {
                    inner.entries.remove(&key);
                }
            }
        }
        result
    }

    /// Cached value for a key, if one has resolved
    pub fn peek(&self, key: &QueryKey) -> Option<Value> {
        match self.lock().entries.get(key) {
            Some(Entry::Ready { value, .. }) => Some(value.clone()),
            _ => None,
        }
    }

    /// Drop every key (list and detail, resolved or in flight) of a resource.
    /// Returns how many entries were dropped.
    pub fn invalidate_resource(&self, resource: &str) -> usize {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.starts_with(&[resource]));
        let dropped = before - inner.entries.len();
        tracing::debug!("invalidated {} cached queries for {}", dropped, resource);
        dropped
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ListParams;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counting_fetch(
        calls: &Arc<AtomicUsize>,
        value: Value,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<Value, ApiError>> {
        let calls = calls.clone();
        move || {
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(value)
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn concurrent_identical_fetches_coalesce() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::list("order", &ListParams::new(1, 10));

        let (a, b) = tokio::join!(
            cache.fetch(key.clone(), counting_fetch(&calls, json!({"n": 1}))),
            cache.fetch(key.clone(), counting_fetch(&calls, json!({"n": 2}))),
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[tokio::test]
    async fn resolved_values_are_served_from_cache() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::detail("coupon", "c1");

        cache.fetch(key.clone(), counting_fetch(&calls, json!(1))).await.unwrap();
        let second = cache.fetch(key.clone(), counting_fetch(&calls, json!(2))).await.unwrap();
        assert_eq!(second, json!(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.peek(&key), Some(json!(1)));
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = QueryCache::new();
        let key = QueryKey::detail("review", "r1");

        let err = cache
            .fetch(key.clone(), || async { Err(ApiError::new("boom")) })
            .await
            .unwrap_err();
        assert_eq!(err.message, "boom");
        assert!(cache.is_empty());

        let ok = cache.fetch(key, || async { Ok(json!("fine")) }).await.unwrap();
        assert_eq!(ok, json!("fine"));
    }

    #[tokio::test]
    async fn invalidation_drops_list_and_detail_of_one_resource() {
        let cache = QueryCache::new();
        let list = QueryKey::list("tenant", &ListParams::new(1, 10));
        let detail = QueryKey::detail("tenant", "t1");
        let other = QueryKey::detail("staff", "s1");
        for key in [&list, &detail, &other] {
            cache.fetch(key.clone(), || async { Ok(json!(true)) }).await.unwrap();
        }

        assert_eq!(cache.invalidate_resource("tenant"), 2);
        assert_eq!(cache.peek(&list), None);
        assert_eq!(cache.peek(&detail), None);
        assert_eq!(cache.peek(&other), Some(json!(true)));
    }

    #[tokio::test]
    async fn late_response_after_invalidation_is_not_stored() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::list("order", &ListParams::new(1, 10));

        let pending = cache.fetch(key.clone(), counting_fetch(&calls, json!("stale")));
        let invalidate = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            cache.invalidate_resource("order");
        };
        let (stale, _) = tokio::join!(pending, invalidate);
        assert_eq!(stale.unwrap(), json!("stale"));
        assert_eq!(cache.peek(&key), None);

        let fresh = cache.fetch(key, counting_fetch(&calls, json!("fresh"))).await.unwrap();
        assert_eq!(fresh, json!("fresh"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn oldest_results_are_evicted_past_capacity() {
        let cache = QueryCache::with_capacity(2);
        let searches: Vec<QueryKey> = ["s", "sh", "sho"]
            .iter()
            .map(|text| QueryKey::list("review", &ListParams::new(1, 10).with_search(*text)))
            .collect();
        for key in &searches {
            cache.fetch(key.clone(), || async { Ok(json!([])) }).await.unwrap();
        }

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek(&searches[0]), None);
        assert_eq!(cache.peek(&searches[2]), Some(json!([])));
    }

    #[tokio::test]
    async fn eviction_skips_keys_dropped_earlier() {
        let cache = QueryCache::with_capacity(2);
        let key = |id: &str| QueryKey::detail("coupon", id);

        cache.fetch(key("c1"), || async { Ok(json!(1)) }).await.unwrap();
        cache.fetch(key("c2"), || async { Ok(json!(2)) }).await.unwrap();
        cache.invalidate_resource("coupon");
        cache.fetch(key("c1"), || async { Ok(json!(1)) }).await.unwrap();
        cache.fetch(key("c3"), || async { Ok(json!(3)) }).await.unwrap();
        cache.fetch(key("c4"), || async { Ok(json!(4)) }).await.unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek(&key("c1")), None);
        assert_eq!(cache.peek(&key("c3")), Some(json!(3)));
        assert_eq!(cache.peek(&key("c4")), Some(json!(4)));
    }
}
