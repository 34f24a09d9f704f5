//! Job event broadcaster for real-time job list rendering.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::job::Job;

/// Change to the job collection.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum JobEventKind {
    /// A job was appended in `Pending` status.
    Enqueued { job: Job },
    /// An existing job's fields changed. Carries the job after the change.
    Updated { job: Job },
    /// The whole collection was discarded.
    Cleared { discarded: usize },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEvent {
    #[serde(flatten)]
    pub kind: JobEventKind,
    pub timestamp: DateTime<Utc>,
}

impl JobEvent {
    pub fn enqueued(job: Job) -> Self {
        Self::now(JobEventKind::Enqueued { job })
    }

    pub fn updated(job: Job) -> Self {
        Self::now(JobEventKind::Updated { job })
    }

    pub fn cleared(discarded: usize) -> Self {
        Self::now(JobEventKind::Cleared { discarded })
    }

    fn now(kind: JobEventKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
        }
    }

    /// The job this event is about, if any.
    pub fn job(&self) -> Option<&Job> {
        match &self.kind {
            JobEventKind::Enqueued { job } | JobEventKind::Updated { job } => Some(job),
            JobEventKind::Cleared { .. } => None,
        }
    }
}

/// Broadcasts job events to any number of subscribers.
#[derive(Clone)]
pub struct JobEventBroadcaster {
    sender: Arc<broadcast::Sender<JobEvent>>,
}

impl JobEventBroadcaster {
    /// Creates a new broadcaster with the specified channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn send(&self, event: JobEvent) {
        // No active receivers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.sender.subscribe()
    }
}

impl Default for JobEventBroadcaster {
    fn default() -> Self {
        Self::new(100)
    }
}
