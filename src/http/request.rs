use reqwest::multipart::Form;
use reqwest::Method;
use serde_json::Value;

pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn method(&self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Patch => Method::PATCH,
            Verb::Delete => Method::DELETE,
        }
    }
}

/// Which session headers a request carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub auth_required: bool,
    pub tenant_scoped: bool,
}

impl Access {
    /// Neither bearer token nor tenant header
    pub const PUBLIC: Access = Access { auth_required: false, tenant_scoped: false };
    /// Tenant header only
    pub const TENANT: Access = Access { auth_required: false, tenant_scoped: true };
    /// Bearer token and tenant header
    pub const AUTHENTICATED: Access = Access { auth_required: true, tenant_scoped: true };
}

pub enum RequestBody {
    Empty,
    Json(Value),
    /// Sent without an explicit Content-Type so the transport can add the boundary
    Multipart(Form),
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::Empty => write!(f, "Empty"),
            RequestBody::Json(value) => write!(f, "Json({})", value),
            RequestBody::Multipart(_) => write!(f, "Multipart(..)"),
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<Form> for RequestBody {
    fn from(form: Form) -> Self {
        RequestBody::Multipart(form)
    }
}

impl From<Option<Value>> for RequestBody {
    fn from(value: Option<Value>) -> Self {
        value.map(RequestBody::Json).unwrap_or(RequestBody::Empty)
    }
}

#[derive(Debug)]
pub struct RequestDescriptor {
    /// Path relative to the API base URL
    pub url: String,
    pub verb: Verb,
    pub params: Vec<(String, String)>,
    pub body: RequestBody,
    pub content_type: String,
    pub access: Access,
}

impl RequestDescriptor {
    pub fn new(verb: Verb, url: impl Into<String>, access: Access) -> Self {
        Self {
            url: url.into(),
            verb,
            params: Vec::new(),
            body: RequestBody::Empty,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            access,
        }
    }

    pub fn params(mut self, params: &[(String, String)]) -> Self {
        self.params = params.to_vec();
        self
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Content-Type header to send, if any
    pub fn content_type_header(&self) -> Option<&str> {
        if self.body.is_multipart() {
            None
        } else {
            Some(&self.content_type)
        }
    }
}
