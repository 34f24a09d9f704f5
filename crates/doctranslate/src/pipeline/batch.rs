use std::sync::Arc;

use serde::Serialize;
use tracing::{info, info_span, Instrument};

use crate::broadcast::JobStore;

use super::runner::{JobOutcome, Pipeline};

/// Counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub attempted: usize,
    pub completed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    Ran(BatchSummary),
    /// Another run was in flight; nothing was done.
    AlreadyRunning,
}

impl BatchOutcome {
    pub fn summary(&self) -> Option<BatchSummary> {
        match self {
            BatchOutcome::Ran(summary) => Some(*summary),
            BatchOutcome::AlreadyRunning => None,
        }
    }
}

/// Processes eligible jobs one after another.
///
/// At most one run is in flight per [`JobStore`], however many runners
/// share it.
pub struct BatchRunner {
    pipeline: Pipeline,
}

impl BatchRunner {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    pub fn store(&self) -> &Arc<JobStore> {
        self.pipeline.store()
    }

    pub fn is_running(&self) -> bool {
        self.store().is_batch_running()
    }

    /// Runs every PENDING or ERROR job, in collection order.
    ///
    /// The eligible set is snapshotted once at the start; jobs enqueued
    /// during the run wait for the next one.
    pub async fn run_batch(&self) -> BatchOutcome {
        let Some(guard) = self.store().try_begin_batch() else {
            info!("Batch already running, ignoring trigger");
            return BatchOutcome::AlreadyRunning;
        };

        let jobs = guard.eligible();
        let span = info_span!("batch", jobs = jobs.len());

        async {
            let mut summary = BatchSummary::default();
            for job in &jobs {
                summary.attempted += 1;
                match self.pipeline.run(job).await {
                    JobOutcome::Completed => summary.completed += 1,
                    JobOutcome::Failed => summary.failed += 1,
                }
            }

            info!(
                attempted = summary.attempted,
                completed = summary.completed,
                failed = summary.failed,
                "Batch finished"
            );
            BatchOutcome::Ran(summary)
        }
        .instrument(span)
        .await
    }
}
