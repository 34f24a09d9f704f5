use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::error::ProcessError;
use crate::file_type::FileType;
use crate::job::Job;
use crate::processor::{ContentExtractor, ExtractedContent};

/// Stand-in for binary-format extraction (Word and unrecognized files).
///
/// The source bytes are never decoded. After `delay` it yields a placeholder
/// naming the file.
pub struct SimulatedBinaryExtractor {
    delay: Duration,
}

impl SimulatedBinaryExtractor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

pub fn placeholder_text(filename: &str) -> String {
    format!(
        "[Content extracted from {}]\nThis is a placeholder for binary document content.",
        filename
    )
}

#[async_trait]
impl ContentExtractor for SimulatedBinaryExtractor {
    async fn extract(&self, job: &Job) -> Result<ExtractedContent, ProcessError> {
        debug!(
            "Simulating binary extraction for {} ({:?})",
            job.name, self.delay
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(ExtractedContent {
            text: placeholder_text(&job.name),
            binary: true,
        })
    }

    fn supports(&self, file_type: FileType) -> bool {
        !file_type.is_text_readable()
    }
}
