pub mod binary;
pub mod text;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProcessError;
use crate::file_type::FileType;
use crate::job::Job;

/// Translatable text obtained from a job's source file.
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    pub text: String,
    /// Produced by a binary-format extractor; finalizing such a job
    /// includes a re-encoding step.
    pub binary: bool,
}

#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(&self, job: &Job) -> Result<ExtractedContent, ProcessError>;
    fn supports(&self, file_type: FileType) -> bool;
}

pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn ContentExtractor>>,
}

impl ExtractorRegistry {
    pub fn new(binary_read_delay: Duration) -> Self {
        Self::with_extractors(vec![
            Box::new(text::TextExtractor::new()),
            Box::new(binary::SimulatedBinaryExtractor::new(binary_read_delay)),
        ])
    }

    pub fn with_extractors(extractors: Vec<Box<dyn ContentExtractor>>) -> Self {
        Self { extractors }
    }

    pub async fn extract(&self, job: &Job) -> Result<ExtractedContent, ProcessError> {
        for extractor in &self.extractors {
            if extractor.supports(job.file_type) {
                return extractor.extract(job).await;
            }
        }

        Err(ProcessError::UnsupportedFormat(
            job.file_type.extension().to_string(),
        ))
    }
}
