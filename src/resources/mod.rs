//! Resource hooks: list/detail queries and mutations per domain resource.
//!
//! Every resource is described by a static [`ResourceSpec`]; mutations declare
//! which resources they invalidate, and [`Resource`] applies that after each
//! successful call.

pub mod campaign;
pub mod coupon;
pub mod order;
pub mod payment;
pub mod permission;
pub mod resource;
pub mod review;
pub mod role;
pub mod staff;
pub mod tenant;

pub use resource::Resource;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{HttpClient, Verb};
use crate::query::QueryCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Tenant,
    Staff,
    Role,
    Permission,
    Order,
    Payment,
    Campaign,
    Coupon,
    Review,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::Tenant,
        ResourceKind::Staff,
        ResourceKind::Role,
        ResourceKind::Permission,
        ResourceKind::Order,
        ResourceKind::Payment,
        ResourceKind::Campaign,
        ResourceKind::Coupon,
        ResourceKind::Review,
    ];

    /// Cache-key prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Tenant => "tenant",
            ResourceKind::Staff => "staff",
            ResourceKind::Role => "role",
            ResourceKind::Permission => "permission",
            ResourceKind::Order => "order",
            ResourceKind::Payment => "payment",
            ResourceKind::Campaign => "campaign",
            ResourceKind::Coupon => "coupon",
            ResourceKind::Review => "review",
        }
    }

    /// Human-facing singular name
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Tenant => "Tenant",
            ResourceKind::Staff => "Staff member",
            ResourceKind::Role => "Role",
            ResourceKind::Permission => "Permission",
            ResourceKind::Order => "Order",
            ResourceKind::Payment => "Payment",
            ResourceKind::Campaign => "Campaign",
            ResourceKind::Coupon => "Coupon",
            ResourceKind::Review => "Review",
        }
    }

    pub fn spec(&self) -> &'static ResourceSpec {
        match self {
            ResourceKind::Tenant => &tenant::SPEC,
            ResourceKind::Staff => &staff::SPEC,
            ResourceKind::Role => &role::SPEC,
            ResourceKind::Permission => &permission::SPEC,
            ResourceKind::Order => &order::SPEC,
            ResourceKind::Payment => &payment::SPEC,
            ResourceKind::Campaign => &campaign::SPEC,
            ResourceKind::Coupon => &coupon::SPEC,
            ResourceKind::Review => &review::SPEC,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted || format!("{}s", kind.as_str()) == wanted)
            .ok_or_else(|| format!("unknown resource '{}'", s))
    }
}

/// Identifier of a server record (`_id` or `id`, string or number)
pub fn record_id(record: &Value) -> Option<String> {
    ["_id", "id"]
        .iter()
        .filter_map(|field| record.get(field))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// A mutation and the resources whose cached queries it makes stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub verb: Verb,
    pub invalidates: &'static [ResourceKind],
}

impl Mutation {
    pub const fn create(invalidates: &'static [ResourceKind]) -> Self {
        Self { verb: Verb::Post, invalidates }
    }

    pub const fn update(invalidates: &'static [ResourceKind]) -> Self {
        Self { verb: Verb::Put, invalidates }
    }

    pub const fn delete(invalidates: &'static [ResourceKind]) -> Self {
        Self { verb: Verb::Delete, invalidates }
    }

    pub const fn status(invalidates: &'static [ResourceKind]) -> Self {
        Self { verb: Verb::Patch, invalidates }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMutation {
    /// Prefix; the record id is appended
    pub path: &'static str,
    pub mutation: Mutation,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ResourceSpec {
    pub kind: ResourceKind,
    /// List and create endpoint
    pub collection_path: &'static str,
    /// Detail, update and delete prefix; the record id is appended
    pub item_path: &'static str,
    /// Key holding the list envelope when it is not under `data`
    pub envelope_key: &'static str,
    /// Key holding a single record when it is not under `data`
    pub record_key: &'static str,
    pub create: Mutation,
    pub update: Mutation,
    pub delete: Mutation,
    pub status: Option<StatusMutation>,
}

impl ResourceSpec {
    pub fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.item_path.trim_end_matches('/'), path_segment(id))
    }

    pub fn status_url(&self, id: &str) -> Option<String> {
        self.status
            .map(|status| format!("{}/{}", status.path.trim_end_matches('/'), path_segment(id)))
    }
}

/// Percent-encode a record id so `/`, `?` and `#` stay inside one path segment
pub fn path_segment(id: &str) -> String {
    // form encoding writes spaces as '+', which a path would keep literally
    url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Entry point bundling the client with the cache every resource shares
#[derive(Clone)]
pub struct ConsoleApi {
    client: HttpClient,
    cache: QueryCache,
}

impl ConsoleApi {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            cache: QueryCache::new(),
        }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn resource(&self, kind: ResourceKind) -> Resource {
        Resource::new(kind.spec(), self.client.clone(), self.cache.clone())
    }

    pub fn tenants(&self) -> Resource {
        self.resource(ResourceKind::Tenant)
    }

    pub fn orders(&self) -> Resource {
        self.resource(ResourceKind::Order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mutation_invalidates_its_own_resource() {
        for kind in ResourceKind::ALL {
            let spec = kind.spec();
            assert_eq!(spec.kind, kind);
            let mut mutations = vec![spec.create, spec.update, spec.delete];
            mutations.extend(spec.status.map(|s| s.mutation));
            for mutation in mutations {
                assert!(mutation.invalidates.contains(&kind), "{} {:?}", kind, mutation);
            }
        }
    }

    #[test]
    fn only_tenant_and_order_have_status_changes() {
        let with_status: Vec<_> = ResourceKind::ALL
            .into_iter()
            .filter(|kind| kind.spec().status.is_some())
            .collect();
        assert_eq!(with_status, vec![ResourceKind::Tenant, ResourceKind::Order]);
    }

    #[test]
    fn item_urls_append_the_id() {
        assert_eq!(tenant::SPEC.item_url("t1"), "api/v1/user/tenant/t1");
        assert_eq!(
            tenant::SPEC.status_url("t1").as_deref(),
            Some("api/v1/user/tenant/update-status/t1")
        );
        assert_eq!(order::SPEC.item_url("o9"), "api/v1/order/o9");
        assert_eq!(coupon::SPEC.status_url("c1"), None);
    }

    #[test]
    fn ids_stay_in_one_segment() {
        assert_eq!(coupon::SPEC.item_url("c1/../x"), "api/v1/coupons/c1%2F..%2Fx");
        assert_eq!(coupon::SPEC.item_url("c2?force=true#top"), "api/v1/coupons/c2%3Fforce%3Dtrue%23top");
        assert_eq!(coupon::SPEC.item_url("spring sale"), "api/v1/coupons/spring%20sale");
        assert_eq!(
            order::SPEC.status_url("o1/x").as_deref(),
            Some("api/v1/order/update-status/o1%2Fx")
        );
    }

    #[test]
    fn kinds_parse_singular_and_plural() {
        assert_eq!("tenants".parse::<ResourceKind>(), Ok(ResourceKind::Tenant));
        assert_eq!("Staff".parse::<ResourceKind>(), Ok(ResourceKind::Staff));
        assert_eq!("coupon".parse::<ResourceKind>(), Ok(ResourceKind::Coupon));
        assert!("products".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn record_ids_from_either_field() {
        assert_eq!(record_id(&serde_json::json!({"_id": "abc", "id": 1})).as_deref(), Some("abc"));
        assert_eq!(record_id(&serde_json::json!({"id": 7})).as_deref(), Some("7"));
        assert_eq!(record_id(&serde_json::json!({"name": "x"})), None);
    }

    #[test]
    fn cache_prefixes_are_distinct() {
        let mut prefixes: Vec<_> = ResourceKind::ALL.iter().map(|k| k.as_str()).collect();
        prefixes.sort();
        prefixes.dedup();
        assert_eq!(prefixes.len(), ResourceKind::ALL.len());
    }
}
