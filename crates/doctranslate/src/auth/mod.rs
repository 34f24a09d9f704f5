//! Login against a local credential pair or a remote login service.

pub mod fallback;
pub mod local;
pub mod remote;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::schema::{AuthConfig, AuthMode};
use crate::secrets::{self, SecretError};

pub use fallback::FallbackAuthenticator;
pub use local::LocalAuthenticator;
pub use remote::RemoteAuthenticator;

/// Used when no local password source is configured.
pub const DEFAULT_LOCAL_PASSWORD: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

/// Body of a login answer, local or remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl LoginResponse {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            token: None,
            message: Some(message.into()),
            user: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// The login service could not be reached.
    #[error("Login service unreachable: {0}")]
    Transport(String),

    #[error("Login service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse login response: {0}")]
    InvalidResponse(String),

    #[error("Login rejected: {0}")]
    Rejected(String),

    #[error("Authentication is misconfigured: {0}")]
    Misconfigured(String),

    #[error("Failed to resolve password: {0}")]
    Secret(#[from] SecretError),
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, AuthError>;
}

/// Builds the authenticator selected by `config.mode`.
pub fn from_config(config: &AuthConfig) -> Result<Arc<dyn Authenticator>, AuthError> {
    let authenticator: Arc<dyn Authenticator> = match config.mode {
        AuthMode::Local => Arc::new(local_from_config(config)?),
        AuthMode::Remote => Arc::new(remote_from_config(config)?),
        AuthMode::RemoteWithFallback => Arc::new(FallbackAuthenticator::new(
            remote_from_config(config)?,
            local_from_config(config)?,
        )),
    };

    log::debug!("Using {:?} authentication", config.mode);
    Ok(authenticator)
}

/// Password to log in with when none is given on the command line.
///
/// The built-in default is a local credential and is never sent to a
/// login service in `remote` mode.
pub fn default_login_password(config: &AuthConfig) -> Result<SecretString, AuthError> {
    if let Some(password) = secrets::resolve_password(config)? {
        return Ok(password);
    }

    match config.mode {
        AuthMode::Local | AuthMode::RemoteWithFallback => {
            Ok(SecretString::from(DEFAULT_LOCAL_PASSWORD))
        }
        AuthMode::Remote => Err(AuthError::Misconfigured(
            "remote login needs a password (--password or auth.password*)".to_string(),
        )),
    }
}

fn local_from_config(config: &AuthConfig) -> Result<LocalAuthenticator, AuthError> {
    let password = match secrets::resolve_password(config)? {
        Some(password) => password,
        None => {
            log::warn!(
                "No local password configured, using the built-in default for '{}'",
                config.username
            );
            SecretString::from(DEFAULT_LOCAL_PASSWORD)
        }
    };

    Ok(LocalAuthenticator::new(config.username.clone(), password))
}

fn remote_from_config(config: &AuthConfig) -> Result<RemoteAuthenticator, AuthError> {
    let endpoint = config
        .endpoint
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AuthError::Misconfigured("auth.endpoint is not set".to_string()))?;

    RemoteAuthenticator::new(endpoint, Duration::from_secs(config.request_timeout_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_config_is_local_admin() {
        let authenticator = from_config(&AuthConfig::default()).unwrap();

        let ok = authenticator
            .login("admin", &SecretString::from("admin"))
            .await
            .unwrap();
        assert!(ok.success);

        let bad = authenticator
            .login("admin", &SecretString::from("wrong"))
            .await
            .unwrap();
        assert!(!bad.success);
    }

    #[test]
    fn test_remote_mode_requires_endpoint() {
        let config = AuthConfig {
            mode: AuthMode::Remote,
            ..AuthConfig::default()
        };
        assert!(matches!(
            from_config(&config),
            Err(AuthError::Misconfigured(_))
        ));
    }

    #[test]
    fn test_missing_password_file_is_error() {
        let config = AuthConfig {
            password_file: Some("/nonexistent/doctranslate/password".to_string()),
            ..AuthConfig::default()
        };
        assert!(matches!(from_config(&config), Err(AuthError::Secret(_))));
    }

    #[test]
    fn test_default_password_only_for_local_checks() {
        use secrecy::ExposeSecret;

        let local = AuthConfig::default();
        assert_eq!(
            default_login_password(&local).unwrap().expose_secret(),
            DEFAULT_LOCAL_PASSWORD
        );

        let fallback = AuthConfig {
            mode: AuthMode::RemoteWithFallback,
            endpoint: Some("http://127.0.0.1:8080".to_string()),
            ..AuthConfig::default()
        };
        assert!(default_login_password(&fallback).is_ok());

        let remote = AuthConfig {
            mode: AuthMode::Remote,
            endpoint: Some("http://127.0.0.1:8080".to_string()),
            ..AuthConfig::default()
        };
        assert!(matches!(
            default_login_password(&remote),
            Err(AuthError::Misconfigured(_))
        ));
    }

    #[test]
    fn test_configured_password_wins_in_remote_mode() {
        use secrecy::ExposeSecret;

        let remote = AuthConfig {
            mode: AuthMode::Remote,
            endpoint: Some("http://127.0.0.1:8080".to_string()),
            password: Some("s3cret".to_string()),
            ..AuthConfig::default()
        };
        assert_eq!(
            default_login_password(&remote).unwrap().expose_secret(),
            "s3cret"
        );
    }

    #[test]
    fn test_login_response_accepts_minimal_body() {
        let response: LoginResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!response.success);
        assert!(response.token.is_none());
        assert!(response.user.is_none());
    }
}
