use std::sync::Mutex;

use super::{CredentialError, CredentialProvider, StoredCredentials};

/// Process-local credentials; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    state: Mutex<StoredCredentials>,
}

impl MemoryCredentialStore {
    pub fn new(credentials: StoredCredentials) -> Self {
        Self {
            state: Mutex::new(credentials),
        }
    }

    /// Seed the tenant id exactly as some other writer might have stored it
    pub fn with_raw_tenant_id(raw: &str) -> Self {
        Self::new(StoredCredentials {
            tenant_id: Some(raw.to_string()),
            ..Default::default()
        })
    }
}

impl CredentialProvider for MemoryCredentialStore {
    fn read(&self) -> StoredCredentials {
        match self.state.lock() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn write(&self, credentials: &StoredCredentials) -> Result<(), CredentialError> {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        *state = credentials.clone();
        Ok(())
    }
}
