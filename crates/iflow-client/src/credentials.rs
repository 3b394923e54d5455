//! OAuth and API-key façade.

use std::sync::Arc;

use iflow_types::{AuthError, AuthState, Credentials, DashboardError, ValidationError};
use parking_lot::RwLock;

use crate::commands;
use crate::storage::{KeyValueStore, API_KEY_KEY};
use crate::transport::Transport;

/// Credential operations. Credentials are never created locally: they come
/// from the backend OAuth flow or from a key the user typed in.
#[derive(Clone)]
pub struct CredentialFacade {
    transport: Transport,
    storage: Arc<dyn KeyValueStore>,
    state: Arc<RwLock<AuthState>>,
}

impl CredentialFacade {
    pub fn new(transport: Transport, storage: Arc<dyn KeyValueStore>) -> Self {
        Self { transport, storage, state: Arc::new(RwLock::new(AuthState::signed_out())) }
    }

    pub fn auth_state(&self) -> AuthState {
        self.state.read().clone()
    }

    /// Read stored credentials from the backend and adopt them.
    pub async fn check_auth(&self) -> Result<AuthState, DashboardError> {
        let creds = commands::get_oauth_creds(&self.transport).await?;
        let auth = AuthState::from_credentials(creds);
        *self.state.write() = auth.clone();
        Ok(auth)
    }

    /// Run the backend OAuth flow.
    ///
    /// Succeeds only when the backend reports `success` together with an
    /// API key; anything else leaves the cached state untouched.
    pub async fn start_oauth_login(&self) -> Result<Credentials, DashboardError> {
        let result = commands::start_oauth(&self.transport).await?;
        let status = result.status.clone();
        let creds = result
            .into_credentials()
            .ok_or(AuthError::LoginRejected { status })?;

        *self.state.write() = AuthState::from_credentials(Some(creds.clone()));
        tracing::info!("OAuth login completed");
        Ok(creds)
    }

    /// Ask the backend to refresh the OAuth token.
    pub async fn refresh_token(&self) -> Result<Credentials, DashboardError> {
        let creds = commands::refresh_oauth_token(&self.transport).await?;
        if !creds.has_api_key() {
            return Err(AuthError::NotAuthenticated.into());
        }

        *self.state.write() = AuthState::from_credentials(Some(creds.clone()));
        tracing::info!("OAuth token refreshed");
        Ok(creds)
    }

    /// Delete the backend credentials once `confirm` approves.
    ///
    /// Returns `Ok(false)` without contacting the backend when declined.
    pub async fn logout<F>(&self, confirm: F) -> Result<bool, DashboardError>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return Ok(false);
        }

        commands::delete_oauth_creds(&self.transport).await?;
        *self.state.write() = AuthState::signed_out();
        tracing::info!("logged out");
        Ok(true)
    }

    /// Persist a directly entered API key. Never contacts the backend.
    pub fn save_api_key_direct(&self, key: &str) -> Result<(), DashboardError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ValidationError::EmptyField { field: "apiKey".to_string() }.into());
        }
        self.storage.set(API_KEY_KEY, key)?;
        Ok(())
    }

    pub fn load_api_key(&self) -> Result<Option<String>, DashboardError> {
        Ok(self.storage.get(API_KEY_KEY)?)
    }

    pub fn clear_api_key(&self) -> Result<(), DashboardError> {
        Ok(self.storage.remove(API_KEY_KEY)?)
    }
}
