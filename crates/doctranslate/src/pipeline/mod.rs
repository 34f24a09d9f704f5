pub mod batch;
pub mod config;
pub mod error;
pub mod runner;

pub use batch::{BatchOutcome, BatchRunner, BatchSummary};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use runner::{truncate_chars, JobOutcome, Pipeline, JOB_FAILED_MESSAGE};
