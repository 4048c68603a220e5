use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::{config, AppConfig};
use crate::credentials::{CredentialProvider, FileCredentialStore};
use crate::guard::{GuardDecision, SessionGuard};
use crate::http::HttpClient;
use crate::resources::ConsoleApi;

/// Everything a command needs: persisted credentials, the API and the guard
pub struct CliContext {
    pub config: &'static AppConfig,
    pub credentials: Arc<dyn CredentialProvider>,
    pub api: ConsoleApi,
    pub guard: SessionGuard,
}

impl CliContext {
    pub fn load() -> anyhow::Result<Self> {
        let config = config();
        let config_dir = config.session.resolve_config_dir()?;
        let store = FileCredentialStore::in_dir(&config_dir);
        tracing::debug!("credentials at {}", store.path().display());

        let credentials: Arc<dyn CredentialProvider> = Arc::new(store);
        let client = HttpClient::from_config(config, credentials.clone())?;
        let guard = SessionGuard::new(credentials.clone(), &config.session);

        Ok(Self {
            config,
            credentials,
            api: ConsoleApi::new(client),
            guard,
        })
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.api.client().clone(), self.config.session.token_expiry_days)
    }

    /// Gate a command the way the dashboard gates a route
    pub fn require_session(&mut self, location: &str) -> anyhow::Result<()> {
        match self.guard.evaluate(location) {
            GuardDecision::Render => Ok(()),
            GuardDecision::Redirect(to) if to == self.guard.login_path() => Err(anyhow::anyhow!(
                "Not signed in. Use 'console auth login <email>' first"
            )),
            GuardDecision::Redirect(to) => Err(anyhow::anyhow!("Redirected to {}", to)),
            GuardDecision::Loading => Err(anyhow::anyhow!("Session check did not complete")),
        }
    }
}
