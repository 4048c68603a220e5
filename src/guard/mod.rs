use std::sync::Arc;

use crate::config::SessionConfig;
use crate::credentials::CredentialProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Still checking; show a neutral loading indicator, no route content
    Loading,
    Render,
    Redirect(String),
}

/// Gates every location except the login path on the presence of a token
pub struct SessionGuard {
    credentials: Arc<dyn CredentialProvider>,
    login_path: String,
    landing_path: String,
    state: GuardState,
}

impl SessionGuard {
    pub fn new(credentials: Arc<dyn CredentialProvider>, session: &SessionConfig) -> Self {
        Self {
            credentials,
            login_path: session.login_path.clone(),
            landing_path: session.landing_path.clone(),
            state: GuardState::Checking,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Decision for the last known state, without re-reading credentials
    pub fn decision(&self, location: &str) -> GuardDecision {
        let on_login = same_path(location, &self.login_path);
        match self.state {
            GuardState::Checking => GuardDecision::Loading,
            GuardState::Unauthenticated if !on_login => GuardDecision::Redirect(self.login_path.clone()),
            GuardState::Authenticated if on_login => GuardDecision::Redirect(self.landing_path.clone()),
            _ => GuardDecision::Render,
        }
    }

    /// Re-read the token and decide what to do with `location`
    pub fn evaluate(&mut self, location: &str) -> GuardDecision {
        self.state = if self.credentials.access_token().is_some() {
            GuardState::Authenticated
        } else {
            GuardState::Unauthenticated
        };
        let decision = self.decision(location);
        tracing::debug!("guard {:?} at {} -> {:?}", self.state, location, decision);
        decision
    }
}

fn same_path(location: &str, path: &str) -> bool {
    let location = location.split(['?', '#']).next().unwrap_or_default();
    let trim = |p: &str| p.trim_end_matches('/').to_string();
    trim(location) == trim(path)
}
