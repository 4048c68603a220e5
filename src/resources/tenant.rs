use serde_json::Value;

use super::{Mutation, ResourceKind, ResourceSpec, StatusMutation};
use crate::error::ApiError;
use crate::http::HttpClient;

const INVALIDATES: &[ResourceKind] = &[ResourceKind::Tenant];

pub const VALIDATE_DOMAIN_PATH: &str = "api/v1/user/tenant/validate-domain";

pub const SPEC: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Tenant,
    collection_path: "api/v1/user/tenant/",
    item_path: "api/v1/user/tenant",
    envelope_key: "tenants",
    record_key: "tenant",
    create: Mutation::create(INVALIDATES),
    update: Mutation::update(INVALIDATES),
    delete: Mutation::delete(INVALIDATES),
    status: Some(StatusMutation {
        path: "api/v1/user/tenant/update-status",
        mutation: Mutation::status(INVALIDATES),
    }),
};

/// Check a storefront domain before any tenant context exists.
///
/// Sent without bearer token or tenant header; the answer is not cached since
/// availability changes underneath us.
pub async fn validate_domain(client: &HttpClient, domain: &str) -> Result<Value, ApiError> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(ApiError::new("A domain is required"));
    }
    client
        .get_unscoped(VALIDATE_DOMAIN_PATH, &[("domain".to_string(), domain.to_string())])
        .await
}
