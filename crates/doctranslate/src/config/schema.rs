use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::translate::LanguagePair;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub version: String,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub pipeline: PipelineSettings,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            translation: TranslationConfig::default(),
            pipeline: PipelineSettings::default(),
            auth: AuthConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
    /// API key given inline. Prefer `api_key_file` or `api_key_env_var`.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_file: Option<String>,
    #[serde(
        default = "default_api_key_env_var",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_key_env_var: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_source_language() -> String {
    LanguagePair::default().source
}

fn default_target_language() -> String {
    LanguagePair::default().target
}

fn default_api_key_env_var() -> Option<String> {
    Some("GEMINI_API_KEY".to_string())
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl TranslationConfig {
    pub fn languages(&self) -> LanguagePair {
        LanguagePair {
            source: self.source_language.clone(),
            target: self.target_language.clone(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            source_language: default_source_language(),
            target_language: default_target_language(),
            api_key: None,
            api_key_file: None,
            api_key_env_var: default_api_key_env_var(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSettings {
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default = "default_binary_read_delay_ms")]
    pub binary_read_delay_ms: u64,
    #[serde(default = "default_binary_finalize_delay_ms")]
    pub binary_finalize_delay_ms: u64,
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_max_chars() -> usize {
    5000
}

fn default_binary_read_delay_ms() -> u64 {
    1500
}

fn default_binary_finalize_delay_ms() -> u64 {
    1000
}

fn default_event_capacity() -> usize {
    100
}

impl PipelineSettings {
    pub fn binary_read_delay(&self) -> Duration {
        Duration::from_millis(self.binary_read_delay_ms)
    }

    pub fn binary_finalize_delay(&self) -> Duration {
        Duration::from_millis(self.binary_finalize_delay_ms)
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            binary_read_delay_ms: default_binary_read_delay_ms(),
            binary_finalize_delay_ms: default_binary_finalize_delay_ms(),
            event_capacity: default_event_capacity(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthMode {
    /// Compare against the configured credential pair.
    #[default]
    Local,
    /// Ask the remote login endpoint.
    Remote,
    /// Ask the remote endpoint; only if it cannot be reached, check locally.
    RemoteWithFallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthMode,
    /// Base URL of the login service (`{endpoint}/api/login`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env_var: Option<String>,
    #[serde(default = "default_auth_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_auth_timeout_secs() -> u64 {
    30
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::default(),
            endpoint: None,
            username: default_username(),
            password: None,
            password_file: None,
            password_env_var: None,
            request_timeout_secs: default_auth_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: String,
}

fn default_output_directory() -> String {
    "translated".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}
