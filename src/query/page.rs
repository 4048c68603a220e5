use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Paginated result envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T = Value> {
    pub results: Vec<T>,
    pub total_count: u64,
    pub total_pages: u64,
    pub current_page: u64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Decode a list response into one envelope.
///
/// Endpoints answer either `{data: {results, ...}}` or `{<key>: {results, ...}}`
/// (sometimes `{<key>: [...]}`); both land in the same [`Page`]. Missing
/// counters are derived from what is present.
pub fn decode_page(body: &Value, envelope_key: &str, requested_page: u32) -> Result<Page, ApiError> {
    let candidates = [body.get("data"), body.get(envelope_key), Some(body)];
    let page = candidates
        .into_iter()
        .flatten()
        .find_map(|candidate| page_from(candidate, requested_page));

    page.ok_or_else(|| {
        tracing::warn!("list response matched no known envelope (key {})", envelope_key);
        ApiError::unknown()
    })
}

fn page_from(candidate: &Value, requested_page: u32) -> Option<Page> {
    let (results, object) = match candidate {
        Value::Array(items) => (items.clone(), None),
        Value::Object(map) => (map.get("results")?.as_array()?.clone(), Some(map)),
        _ => return None,
    };

    let counter = |name: &str| object.and_then(|map| map.get(name)).and_then(Value::as_u64);
    let total_count = counter("totalCount").unwrap_or(results.len() as u64);
    let total_pages = counter("totalPages").unwrap_or(if total_count > 0 { 1 } else { 0 });
    let current_page = counter("currentPage").unwrap_or(u64::from(requested_page)).max(1);

    Some(Page {
        results,
        total_count,
        total_pages,
        current_page,
    })
}

/// Decode a single-record response: `{data: {...}}`, `{<key>: {...}}` or the bare record
pub fn decode_record(body: Value, record_key: &str) -> Value {
    match body {
        Value::Object(mut map) => {
            for key in ["data", record_key] {
                if map.get(key).is_some_and(Value::is_object) {
                    return map.remove(key).unwrap_or_default();
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}
