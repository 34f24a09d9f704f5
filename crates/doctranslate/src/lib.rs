pub mod auth;
pub mod broadcast;
pub mod config;
pub mod error;
pub mod export;
pub mod file_type;
pub mod intake;
pub mod job;
pub mod logging;
pub mod pipeline;
pub mod processor;
pub mod sanitize;
pub mod secrets;
pub mod session;
pub mod translate;

pub use auth::{AuthError, Authenticator, LoginResponse, User};
pub use broadcast::{JobEvent, JobEventBroadcaster, JobEventKind, JobStore};
pub use config::{load_config, Config};
pub use error::{
    ConfigError, DocTranslateError, ExportError, IntakeError, ProcessError, Result,
    TranslateError,
};
pub use file_type::{classify, format_file_size, FileType};
pub use intake::{FileSource, UploadedFile};
pub use job::{Job, JobPatch, JobStatus};
pub use pipeline::{BatchOutcome, BatchRunner, BatchSummary, Pipeline, PipelineConfig};
pub use secrets::{resolve_secret, resolve_secret_optional, SecretError};
pub use session::Session;
pub use translate::{GeminiTranslator, LanguagePair, Translator};
