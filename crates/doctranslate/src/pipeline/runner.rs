use std::sync::Arc;

use tracing::{debug, error, info, info_span, Instrument};

use crate::broadcast::JobStore;
use crate::job::{Job, JobPatch};
use crate::processor::{ExtractedContent, ExtractorRegistry};
use crate::translate::Translator;

use super::config::PipelineConfig;
use super::error::PipelineError;

/// Shown on a failed job. The cause only goes to the log.
pub const JOB_FAILED_MESSAGE: &str =
    "Translation failed. Please check the API key or file format.";

/// Progress checkpoint once the translator has answered.
const TRANSLATED_PROGRESS: u8 = 80;

/// How a single job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Completed,
    Failed,
}

/// Drives one job from pick-up to COMPLETED or ERROR.
///
/// Every transition goes through the shared [`JobStore`], so subscribers
/// observe 10, 30, 80 and 100 as separate events. Updates for a job that
/// has since been cleared from the store are dropped there.
pub struct Pipeline {
    config: Arc<PipelineConfig>,
    extractors: ExtractorRegistry,
    translator: Arc<dyn Translator>,
    store: Arc<JobStore>,
}

impl Pipeline {
    /// Production constructor, builds the extractor registry from config.
    pub fn from_config(
        config: Arc<PipelineConfig>,
        translator: Arc<dyn Translator>,
        store: Arc<JobStore>,
    ) -> Self {
        let extractors = ExtractorRegistry::new(config.binary_read_delay);
        Self::new(config, extractors, translator, store)
    }

    pub fn new(
        config: Arc<PipelineConfig>,
        extractors: ExtractorRegistry,
        translator: Arc<dyn Translator>,
        store: Arc<JobStore>,
    ) -> Self {
        Self {
            config,
            extractors,
            translator,
            store,
        }
    }

    pub fn store(&self) -> &Arc<JobStore> {
        &self.store
    }

    pub async fn run(&self, job: &Job) -> JobOutcome {
        let span = info_span!("translate_job",
            job_id = %job.id,
            file_name = %job.name,
            file_type = %job.file_type,
        );

        async {
            match self.process(job).await {
                Ok(()) => {
                    info!("Job completed");
                    JobOutcome::Completed
                }
                Err(e) => {
                    error!(error = %e, "Job failed");
                    self.store.update(&job.id, JobPatch::failed(JOB_FAILED_MESSAGE));
                    JobOutcome::Failed
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn process(&self, job: &Job) -> Result<(), PipelineError> {
        self.store.update(&job.id, JobPatch::processing());

        let content = self
            .step_acquire_content(job)
            .instrument(info_span!("acquire_content"))
            .await?;

        self.store.update(&job.id, JobPatch::translating());

        let input = truncate_chars(&content.text, self.config.max_chars);
        let translated = self
            .step_translate(input)
            .instrument(info_span!("translate"))
            .await?;

        self.store
            .update(&job.id, JobPatch::new().progress(TRANSLATED_PROGRESS));

        if content.binary && !self.config.binary_finalize_delay.is_zero() {
            debug!("Finalizing binary document");
            tokio::time::sleep(self.config.binary_finalize_delay).await;
        }

        self.store.update(&job.id, JobPatch::completed(translated));
        Ok(())
    }

    async fn step_acquire_content(&self, job: &Job) -> Result<ExtractedContent, PipelineError> {
        let content = self.extractors.extract(job).await?;
        debug!(
            chars = content.text.chars().count(),
            binary = content.binary,
            "Content acquired"
        );
        Ok(content)
    }

    async fn step_translate(&self, input: &str) -> Result<String, PipelineError> {
        let translated = self.translator.translate(input).await?;
        if translated.is_empty() {
            debug!("Translator returned no text, keeping the input");
            return Ok(input.to_string());
        }
        Ok(translated)
    }
}

/// First `max_chars` characters of `text` (not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
