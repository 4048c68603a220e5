//! List parameters, cache keys, result envelopes and the coalescing query cache.

pub mod cache;
pub mod key;
pub mod page;
pub mod params;

pub use cache::QueryCache;
pub use key::QueryKey;
pub use page::{decode_page, decode_record, Page};
pub use params::{ListParams, ALL_FILTER};
