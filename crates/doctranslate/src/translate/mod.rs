//! Remote translation call.

pub mod gemini;
pub mod prompt;

use async_trait::async_trait;

use crate::error::TranslateError;

pub use gemini::GeminiTranslator;
pub use prompt::{build_prompt, LanguagePair};

/// Translates one chunk of text between a fixed language pair.
///
/// Implementations return the remote text as is, including an empty string;
/// the pipeline decides how to handle an empty translation.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, TranslateError>;
}
