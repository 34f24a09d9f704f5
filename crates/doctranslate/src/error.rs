use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocTranslateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Processing error: {0}")]
    Process(#[from] ProcessError),

    #[error("Translation error: {0}")]
    Translate(#[from] TranslateError),

    #[error("Authentication error: {0}")]
    Auth(#[from] crate::auth::AuthError),

    #[error("Secret error: {0}")]
    Secret(#[from] crate::secrets::SecretError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },
}

/// Failure to obtain the text content of a job's source file.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to read document '{path}': {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No content extractor for file type '{0}'")]
    UnsupportedFormat(String),
}

/// Failure of the remote translation call.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Translation API key is not configured")]
    MissingApiKey,

    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Translation request failed: {0}")]
    Request(String),

    #[error("Translation API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse translation response: {0}")]
    InvalidResponse(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Job '{0}' has no translated content to export")]
    NotCompleted(String),

    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Failed to read file metadata for '{path}': {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory scan failed for '{path}': {source}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Not a file: {0}")]
    NotAFile(PathBuf),
}

pub type Result<T> = std::result::Result<T, DocTranslateError>;
