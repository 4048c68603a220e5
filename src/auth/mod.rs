use serde::Serialize;
use serde_json::{json, Value};

use crate::credentials::CredentialError;
use crate::error::ApiError;
use crate::http::HttpClient;

pub const LOGIN_PATH: &str = "api/v1/user/auth/login";

const TOKEN_POINTERS: [&str; 4] = ["/token", "/accessToken", "/data/token", "/data/accessToken"];
const TENANT_POINTERS: [&str; 4] = ["/tenantId", "/data/tenantId", "/user/tenantId", "/data/user/tenantId"];

/// What the console knows about the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub logged_in: bool,
    pub tenant_id: Option<String>,
}

pub struct AuthService {
    client: HttpClient,
    token_expiry_days: i64,
}

impl AuthService {
    pub fn new(client: HttpClient, token_expiry_days: i64) -> Self {
        Self {
            client,
            token_expiry_days,
        }
    }

    /// Exchange credentials for an access token and store it.
    ///
    /// A tenant id in the response becomes the active tenant unless one is
    /// already chosen.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionStatus, ApiError> {
        let response = self
            .client
            .post_public(LOGIN_PATH, json!({ "email": email, "password": password }))
            .await?;

        let token = first_string(&response, &TOKEN_POINTERS).ok_or_else(|| {
            tracing::warn!("login response carried no token");
            ApiError::unknown()
        })?;

        let credentials = self.client.credentials();
        credentials
            .set_access_token(&token, self.token_expiry_days)
            .map_err(storage_error)?;

        if credentials.tenant_id().is_none() {
            if let Some(tenant_id) = first_string(&response, &TENANT_POINTERS) {
                credentials.set_tenant_id(&tenant_id).map_err(storage_error)?;
            }
        }

        tracing::info!("signed in as {}", email);
        Ok(self.status())
    }

    /// Local sign-out; the server is not contacted
    pub fn logout(&self) -> Result<(), CredentialError> {
        self.client.credentials().clear()?;
        tracing::info!("signed out");
        Ok(())
    }

    pub fn status(&self) -> SessionStatus {
        let credentials = self.client.credentials();
        SessionStatus {
            logged_in: credentials.is_logged_in(),
            tenant_id: credentials.tenant_id(),
        }
    }
}

fn first_string(body: &Value, pointers: &[&str]) -> Option<String> {
    pointers
        .iter()
        .filter_map(|pointer| body.pointer(pointer))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn storage_error(err: CredentialError) -> ApiError {
    tracing::error!("failed to persist session: {}", err);
    ApiError::new(format!("Could not store session: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_lookup_order() {
        let body = json!({"data": {"token": "nested"}, "accessToken": "top"});
        assert_eq!(first_string(&body, &TOKEN_POINTERS).as_deref(), Some("top"));
        assert_eq!(first_string(&json!({"token": ""}), &TOKEN_POINTERS), None);
    }

    #[test]
    fn numeric_tenant_ids_become_strings() {
        let body = json!({"user": {"tenantId": 17}});
        assert_eq!(first_string(&body, &TENANT_POINTERS).as_deref(), Some("17"));
    }
}
