use thiserror::Error;

/// Why a single job failed. Never escapes the batch run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Content acquisition failed: {0}")]
    ContentAcquisition(#[from] crate::error::ProcessError),

    #[error("Translation call failed: {0}")]
    Translation(#[from] crate::error::TranslateError),
}
