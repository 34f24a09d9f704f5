use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use super::{AuthError, Authenticator, LoginResponse};
use crate::sanitize;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// `POST {endpoint}/api/login` with a JSON `{username, password}` body.
pub struct RemoteAuthenticator {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

impl RemoteAuthenticator {
    pub fn new(endpoint: impl Into<String>, request_timeout: Duration) -> Result<Self, AuthError> {
        let client = Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()
            .map_err(|e| AuthError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn login_url(&self) -> String {
        format!("{}/api/login", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Authenticator for RemoteAuthenticator {
    async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, AuthError> {
        let url = self.login_url();
        log::debug!("Logging in '{}' at {}", username, sanitize::redact_url(&url));

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                username,
                password: password.expose_secret(),
            })
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Status {
                status: status.as_u16(),
                body: sanitize::truncate_for_log(&body, sanitize::MAX_ERROR_BODY_CHARS),
            });
        }

        response
            .json::<LoginResponse>()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))
    }
}
