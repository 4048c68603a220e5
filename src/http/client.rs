use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use url::Url;

use super::request::{Access, RequestBody, RequestDescriptor, Verb};
use crate::config::AppConfig;
use crate::credentials::CredentialProvider;
use crate::error::ApiError;

pub const TENANT_HEADER: &str = "x-tenant-id";

#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Backend API client.
///
/// Attaches the bearer token and tenant header per request from the injected
/// credential provider and turns every failure into an [`ApiError`]. It never
/// retries and never touches the stored credentials.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
    log_requests: bool,
}

impl HttpClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ClientBuildError> {
        // Url::join drops the last path segment unless the base ends in '/'
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            credentials,
            log_requests: false,
        })
    }

    pub fn from_config(
        config: &AppConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ClientBuildError> {
        Ok(Self::new(
            &config.api.base_url,
            Duration::from_secs(config.api.request_timeout_secs),
            credentials,
        )?
        .with_request_logging(config.api.enable_request_logging))
    }

    /// Log every outbound request at info level instead of debug
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    /// Assemble the outbound request without sending it
    pub fn build(&self, desc: RequestDescriptor) -> Result<reqwest::Request, ApiError> {
        let url = self.base_url.join(desc.url.trim_start_matches('/')).map_err(|e| {
            tracing::warn!("invalid request path {}: {}", desc.url, e);
            ApiError::unknown()
        })?;

        let mut builder = self.client.request(desc.verb.method(), url);
        if !desc.params.is_empty() {
            builder = builder.query(&desc.params);
        }
        if desc.access.auth_required {
            if let Some(token) = self.credentials.access_token() {
                builder = builder.bearer_auth(token);
            }
        }
        if desc.access.tenant_scoped {
            if let Some(tenant_id) = self.credentials.tenant_id() {
                builder = builder.header(TENANT_HEADER, tenant_id);
            }
        }
        if let Some(content_type) = desc.content_type_header() {
            builder = builder.header(CONTENT_TYPE, content_type);
        }

        builder = match desc.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(serde_json::to_vec(&value)?),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        Ok(builder.build()?)
    }

    /// Send a request and return the parsed body (`null` for empty bodies)
    pub async fn send(&self, desc: RequestDescriptor) -> Result<Value, ApiError> {
        let verb = desc.verb;
        let path = desc.url.clone();
        let request = self.build(desc)?;
        if self.log_requests {
            tracing::info!("{:?} {}", verb, request.url());
        } else {
            tracing::debug!("{:?} {}", verb, request.url());
        }

        let response = self.client.execute(request).await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = serde_json::from_slice::<Value>(&bytes).ok();
            let error = ApiError::from_response(status.as_u16(), body);
            tracing::warn!("{:?} {} failed with {}: {}", verb, path, status, error.message);
            return Err(error);
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Tenant-scoped read without a bearer token
    pub async fn get(&self, url: &str, params: &[(String, String)]) -> Result<Value, ApiError> {
        self.send(RequestDescriptor::new(Verb::Get, url, Access::TENANT).params(params))
            .await
    }

    pub async fn get_authenticated(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<Value, ApiError> {
        self.send(RequestDescriptor::new(Verb::Get, url, Access::AUTHENTICATED).params(params))
            .await
    }

    /// Read made before any tenant context exists (e.g. domain validation)
    pub async fn get_unscoped(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<Value, ApiError> {
        self.send(RequestDescriptor::new(Verb::Get, url, Access::PUBLIC).params(params))
            .await
    }

    /// Public but tenant-scoped write
    pub async fn post(&self, url: &str, body: impl Into<RequestBody>) -> Result<Value, ApiError> {
        self.send(RequestDescriptor::new(Verb::Post, url, Access::TENANT).body(body))
            .await
    }

    pub async fn post_authenticated(
        &self,
        url: &str,
        body: impl Into<RequestBody>,
    ) -> Result<Value, ApiError> {
        self.send(RequestDescriptor::new(Verb::Post, url, Access::AUTHENTICATED).body(body))
            .await
    }

    pub async fn post_public(
        &self,
        url: &str,
        body: impl Into<RequestBody>,
    ) -> Result<Value, ApiError> {
        self.send(RequestDescriptor::new(Verb::Post, url, Access::PUBLIC).body(body))
            .await
    }

    pub async fn put(&self, url: &str, body: impl Into<RequestBody>) -> Result<Value, ApiError> {
        self.send(RequestDescriptor::new(Verb::Put, url, Access::AUTHENTICATED).body(body))
            .await
    }

    pub async fn patch(&self, url: &str, body: impl Into<RequestBody>) -> Result<Value, ApiError> {
        self.send(RequestDescriptor::new(Verb::Patch, url, Access::AUTHENTICATED).body(body))
            .await
    }

    pub async fn delete_resource(&self, url: &str) -> Result<Value, ApiError> {
        self.send(RequestDescriptor::new(Verb::Delete, url, Access::AUTHENTICATED))
            .await
    }
}
