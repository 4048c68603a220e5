use serde_json::{json, Value};

use super::{Mutation, ResourceKind, ResourceSpec};
use crate::error::ApiError;
use crate::http::{Access, HttpClient, RequestBody, RequestDescriptor};
use crate::query::{decode_page, decode_record, ListParams, Page, QueryCache, QueryKey};

/// Queries and mutations for one resource over the shared client and cache
#[derive(Clone)]
pub struct Resource {
    spec: &'static ResourceSpec,
    client: HttpClient,
    cache: QueryCache,
}

impl Resource {
    pub fn new(spec: &'static ResourceSpec, client: HttpClient, cache: QueryCache) -> Self {
        Self { spec, client, cache }
    }

    pub fn kind(&self) -> ResourceKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &'static ResourceSpec {
        self.spec
    }

    pub fn list_key(&self, params: &ListParams) -> QueryKey {
        QueryKey::list(self.spec.kind.as_str(), params)
    }

    pub fn detail_key(&self, id: &str) -> QueryKey {
        QueryKey::detail(self.spec.kind.as_str(), id)
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page, ApiError> {
        let client = self.client.clone();
        let path = self.spec.collection_path;
        let envelope_key = self.spec.envelope_key;
        let requested_page = params.page;
        let query = params.to_query_pairs();
        // Decode before caching so an unrecognised body fails the fetch
        let page = self
            .cache
            .fetch(self.list_key(params), move || async move {
                let body = client.get_authenticated(path, &query).await?;
                let page = decode_page(&body, envelope_key, requested_page)?;
                Ok::<Value, ApiError>(serde_json::to_value(page)?)
            })
            .await?;
        Ok(serde_json::from_value(page)?)
    }

    /// Fetch one record. Disabled for an empty id: resolves to `None` without
    /// touching the network.
    pub async fn get(&self, id: &str) -> Result<Option<Value>, ApiError> {
        if id.trim().is_empty() {
            return Ok(None);
        }
        let id = require_id(id)?;
        let client = self.client.clone();
        let path = self.spec.item_url(id);
        let body = self
            .cache
            .fetch(self.detail_key(id), move || async move {
                client.get_authenticated(&path, &[]).await
            })
            .await?;
        Ok(Some(decode_record(body, self.spec.record_key)))
    }

    pub async fn create(&self, body: impl Into<RequestBody>) -> Result<Value, ApiError> {
        self.mutate(&self.spec.create, self.spec.collection_path.to_string(), body.into())
            .await
    }

    pub async fn update(&self, id: &str, body: impl Into<RequestBody>) -> Result<Value, ApiError> {
        let id = require_id(id)?;
        self.mutate(&self.spec.update, self.spec.item_url(id), body.into())
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let id = require_id(id)?;
        self.mutate(&self.spec.delete, self.spec.item_url(id), RequestBody::Empty)
            .await
            .map(|_| ())
    }

    pub async fn update_status(&self, id: &str, status: &str) -> Result<Value, ApiError> {
        let id = require_id(id)?;
        let status_mutation = self.spec.status.ok_or_else(|| {
            ApiError::new(format!("{} records have no status to update", self.spec.kind))
        })?;
        let url = self.spec.status_url(id).unwrap_or_default();
        self.mutate(&status_mutation.mutation, url, json!({ "status": status }).into())
            .await
    }

    async fn mutate(&self, mutation: &Mutation, url: String, body: RequestBody) -> Result<Value, ApiError> {
        let desc = RequestDescriptor::new(mutation.verb, url, Access::AUTHENTICATED).body(body);
        let response = self.client.send(desc).await?;
        for kind in mutation.invalidates {
            self.cache.invalidate_resource(kind.as_str());
        }
        Ok(decode_record(response, self.spec.record_key))
    }
}

fn require_id(id: &str) -> Result<&str, ApiError> {
    match id.trim() {
        "" => Err(ApiError::new("A record id is required")),
        // dot segments would be resolved away by the URL join
        "." | ".." => Err(ApiError::new(format!("Invalid record id '{}'", id.trim()))),
        id => Ok(id),
    }
}
