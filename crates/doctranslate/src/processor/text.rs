use async_trait::async_trait;

use crate::error::ProcessError;
use crate::file_type::FileType;
use crate::job::Job;
use crate::processor::{ContentExtractor, ExtractedContent};

/// Reads the whole source and decodes it as text.
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentExtractor for TextExtractor {
    async fn extract(&self, job: &Job) -> Result<ExtractedContent, ProcessError> {
        let text = job.source.read_text().await?;
        Ok(ExtractedContent {
            text,
            binary: false,
        })
    }

    fn supports(&self, file_type: FileType) -> bool {
        file_type.is_text_readable()
    }
}
