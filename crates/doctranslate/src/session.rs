//! Login state tied to the job store.

use std::sync::{Arc, RwLock};

use secrecy::SecretString;

use crate::auth::{AuthError, Authenticator, LoginResponse, User};
use crate::broadcast::JobStore;

pub struct Session {
    authenticator: Arc<dyn Authenticator>,
    store: Arc<JobStore>,
    current: RwLock<Option<LoginResponse>>,
}

impl Session {
    pub fn new(authenticator: Arc<dyn Authenticator>, store: Arc<JobStore>) -> Self {
        Self {
            authenticator,
            store,
            current: RwLock::new(None),
        }
    }

    /// Logs in, keeping the successful response as the current session.
    ///
    /// A response with `success: false` becomes [`AuthError::Rejected`].
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, AuthError> {
        let response = self.authenticator.login(username, password).await?;

        if !response.success {
            let message = response
                .message
                .clone()
                .unwrap_or_else(|| "Invalid credentials".to_string());
            return Err(AuthError::Rejected(message));
        }

        log::info!("Logged in as '{}'", username);
        *self.write() = Some(response.clone());
        Ok(response)
    }

    /// Ends the session and discards every job. Returns how many were dropped.
    pub fn logout(&self) -> usize {
        let was_logged_in = self.write().take().is_some();
        let discarded = self.store.clear();
        if was_logged_in {
            log::info!("Logged out, discarded {} job(s)", discarded);
        }
        discarded
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn user(&self) -> Option<User> {
        self.read().as_ref().and_then(|r| r.user.clone())
    }

    pub fn store(&self) -> &Arc<JobStore> {
        &self.store
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<LoginResponse>> {
        self.current.read().unwrap_or_else(|poisoned| {
            log::warn!("Session lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<LoginResponse>> {
        self.current.write().unwrap_or_else(|poisoned| {
            log::warn!("Session lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
