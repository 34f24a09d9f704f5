use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use super::{AuthError, Authenticator, LoginResponse, User};

/// Checks against one configured username/password pair.
pub struct LocalAuthenticator {
    username: String,
    password: SecretString,
}

impl LocalAuthenticator {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn matches(&self, username: &str, password: &SecretString) -> bool {
        username == self.username && password.expose_secret() == self.password.expose_secret()
    }
}

#[async_trait]
impl Authenticator for LocalAuthenticator {
    async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, AuthError> {
        if !self.matches(username, password) {
            log::info!("Local login rejected for '{}'", username);
            return Ok(LoginResponse::rejected("Invalid credentials"));
        }

        Ok(LoginResponse {
            success: true,
            token: Some(uuid::Uuid::new_v4().to_string()),
            message: None,
            user: Some(User {
                id: format!("local:{}", username),
                name: username.to_string(),
            }),
        })
    }
}
