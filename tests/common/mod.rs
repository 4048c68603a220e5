#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;

use commerce_console::credentials::{CredentialProvider, MemoryCredentialStore};
use commerce_console::http::HttpClient;

/// A request as the backend saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|query| url::form_urlencoded::parse(query.as_bytes()).into_owned().collect())
            .unwrap_or_default()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

const EMPTY_PAGE: &str = r#"{"data":{"results":[],"totalCount":0,"totalPages":0,"currentPage":1}}"#;

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: String,
    delay: Duration,
}

#[derive(Default)]
struct BackendState {
    stubs: HashMap<(Method, String), Stub>,
    requests: Vec<RecordedRequest>,
}

/// In-process stand-in for the commerce API. Unstubbed routes answer 200 with
/// an empty page.
pub struct MockBackend {
    pub base_url: String,
    state: Arc<Mutex<BackendState>>,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .context("failed to bind mock backend")?;

        let state = Arc::new(Mutex::new(BackendState::default()));
        let app = Router::new().fallback(record).with_state(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}/", port),
            state,
        })
    }

    pub fn stub(&self, method: Method, path: &str, status: u16, body: Value) {
        self.stub_raw(method, path, status, &body.to_string());
    }

    pub fn stub_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.insert(method, path, status, body, Duration::ZERO);
    }

    pub fn stub_delayed(&self, method: Method, path: &str, body: Value, delay: Duration) {
        self.insert(method, path, 200, &body.to_string(), delay);
    }

    fn insert(&self, method: Method, path: &str, status: u16, body: &str, delay: Duration) {
        let stub = Stub {
            status: StatusCode::from_u16(status).expect("valid status code"),
            body: body.to_string(),
            delay,
        };
        self.state
            .lock()
            .unwrap()
            .stubs
            .insert((method, normalize_path(path)), stub);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        let path = normalize_path(path);
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.path == path)
            .collect()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests_to(method, path).len()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests().pop().expect("backend saw no requests")
    }
}

fn normalize_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

async fn record(
    State(state): State<Arc<Mutex<BackendState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let stub = {
        let mut state = state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: method.clone(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            headers,
            body: body.to_vec(),
        });
        state.stubs.get(&(method, uri.path().to_string())).cloned()
    };

    let stub = stub.unwrap_or(Stub {
        status: StatusCode::OK,
        body: EMPTY_PAGE.to_string(),
        delay: Duration::ZERO,
    });
    if !stub.delay.is_zero() {
        tokio::time::sleep(stub.delay).await;
    }
    (stub.status, [(header::CONTENT_TYPE, "application/json")], stub.body).into_response()
}

/// Credentials of a signed-in admin working inside `tenant`
pub fn signed_in(token: &str, tenant: &str) -> Arc<MemoryCredentialStore> {
    let store = MemoryCredentialStore::default();
    store.set_access_token(token, 7).unwrap();
    store.set_tenant_id(tenant).unwrap();
    Arc::new(store)
}

pub fn client_for(backend: &MockBackend, credentials: Arc<MemoryCredentialStore>) -> HttpClient {
    HttpClient::new(&backend.base_url, Duration::from_secs(5), credentials).unwrap()
}
