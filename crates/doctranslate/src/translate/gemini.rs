//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prompt::{build_prompt, LanguagePair};
use super::Translator;
use crate::config::schema::TranslationConfig;
use crate::error::TranslateError;
use crate::sanitize;

/// Default connect timeout for HTTP requests (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct GeminiTranslator {
    client: Client,
    base_url: String,
    model: String,
    languages: LanguagePair,
    api_key: SecretString,
}

impl GeminiTranslator {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        languages: LanguagePair,
        api_key: SecretString,
        request_timeout: Duration,
    ) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()
            .map_err(|e| TranslateError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            languages,
            api_key,
        })
    }

    pub fn from_config(
        config: &TranslationConfig,
        api_key: SecretString,
    ) -> Result<Self, TranslateError> {
        if api_key.expose_secret().is_empty() {
            return Err(TranslateError::MissingApiKey);
        }

        Self::new(
            config.base_url.clone(),
            config.model.clone(),
            config.languages(),
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
pub(crate) struct GenerateRequest {
    pub(crate) contents: Vec<Content>,
}

#[derive(Serialize)]
pub(crate) struct Content {
    pub(crate) role: String,
    pub(crate) parts: Vec<Part>,
}

#[derive(Serialize)]
pub(crate) struct Part {
    pub(crate) text: String,
}

impl GenerateRequest {
    pub(crate) fn user_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

#[derive(Deserialize, Default)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate; empty if there is none.
    pub(crate) fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let request = GenerateRequest::user_prompt(build_prompt(text, &self.languages));

        debug!(
            model = %self.model,
            chars = text.chars().count(),
            "Sending translation request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslateError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Status {
                status: status.as_u16(),
                body: sanitize::truncate_for_log(&body, sanitize::MAX_ERROR_BODY_CHARS),
            });
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;

        Ok(generated.text())
    }
}
