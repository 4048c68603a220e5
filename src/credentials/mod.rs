//! Session credentials: the access token and the active tenant id.
//!
//! Storage is behind [`CredentialProvider`] so the HTTP client can be handed a
//! file-backed store in the binary and an in-memory one in tests. Reads never
//! fail; anything missing, expired or malformed reads as absent.

mod file;
mod memory;
mod tenant_id;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;
pub use tenant_id::decode_tenant_id;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A cookie-like value with an expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredCookie {
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Everything the console persists between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredCredentials {
    #[serde(default)]
    pub access_token: Option<StoredCookie>,
    #[serde(default)]
    pub logged_in: Option<StoredCookie>,
    /// Raw stored tenant id; may be JSON-quoted
    #[serde(default)]
    pub tenant_id: Option<String>,
}

pub trait CredentialProvider: Send + Sync {
    /// Current persisted state; defaults when nothing usable is stored
    fn read(&self) -> StoredCredentials;

    fn write(&self, credentials: &StoredCredentials) -> Result<(), CredentialError>;

    fn access_token(&self) -> Option<String> {
        self.read()
            .access_token
            .filter(|cookie| cookie.is_live(Utc::now()))
            .map(|cookie| cookie.value)
            .filter(|token| !token.is_empty())
    }

    fn is_logged_in(&self) -> bool {
        self.access_token().is_some()
    }

    fn tenant_id(&self) -> Option<String> {
        self.read().tenant_id.as_deref().and_then(decode_tenant_id)
    }

    /// Store the token and its "logged in" companion. A non-positive expiry
    /// deletes both immediately.
    fn set_access_token(&self, token: &str, expires_in_days: i64) -> Result<(), CredentialError> {
        let mut credentials = self.read();
        if expires_in_days <= 0 {
            credentials.access_token = None;
            credentials.logged_in = None;
        } else {
            let expires_at = Utc::now() + Duration::days(expires_in_days);
            credentials.access_token = Some(StoredCookie {
                value: token.to_string(),
                expires_at,
            });
            credentials.logged_in = Some(StoredCookie {
                value: "true".to_string(),
                expires_at,
            });
        }
        self.write(&credentials)
    }

    fn set_tenant_id(&self, tenant_id: &str) -> Result<(), CredentialError> {
        let mut credentials = self.read();
        credentials.tenant_id = Some(serde_json::to_string(tenant_id)?);
        self.write(&credentials)
    }

    fn clear_tenant_id(&self) -> Result<(), CredentialError> {
        let mut credentials = self.read();
        credentials.tenant_id = None;
        self.write(&credentials)
    }

    /// Sign-out: drop the token and flag, keep the tenant context
    fn clear(&self) -> Result<(), CredentialError> {
        let mut credentials = self.read();
        credentials.access_token = None;
        credentials.logged_in = None;
        self.write(&credentials)
    }
}
