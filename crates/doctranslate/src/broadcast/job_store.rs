//! In-memory ordered job store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::broadcast;

use crate::broadcast::job_events::{JobEvent, JobEventBroadcaster};
use crate::intake::UploadedFile;
use crate::job::{Job, JobPatch};

struct Jobs {
    /// Insertion order is display and processing order.
    ordered: Vec<Job>,
    /// Job id to position in `ordered`.
    index: HashMap<String, usize>,
}

/// Ordered collection of translation jobs.
///
/// Every mutation takes the write lock and publishes a [`JobEvent`] before
/// releasing it, so subscribers see changes in the order they were made.
pub struct JobStore {
    jobs: RwLock<Jobs>,
    events: JobEventBroadcaster,
    /// Set while a batch run owns this store.
    batch_running: AtomicBool,
}

/// Proof that the holder is the only batch run on its store.
///
/// The flag is released when the guard drops, including when the run
/// future is dropped mid-run.
pub struct BatchGuard<'a> {
    store: &'a JobStore,
}

impl BatchGuard<'_> {
    /// Eligible jobs at the start of this run.
    pub fn eligible(&self) -> Vec<Job> {
        self.store.eligible()
    }
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        self.store.batch_running.store(false, Ordering::Release);
    }
}

impl JobStore {
    pub fn new() -> Self {
        Self::with_broadcaster(JobEventBroadcaster::default())
    }

    pub fn with_broadcaster(events: JobEventBroadcaster) -> Self {
        Self {
            jobs: RwLock::new(Jobs {
                ordered: Vec::new(),
                index: HashMap::new(),
            }),
            events,
            batch_running: AtomicBool::new(false),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Jobs> {
        match self.jobs.read() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Job store lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Jobs> {
        match self.jobs.write() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Job store lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Appends a pending job for each file, in input order.
    ///
    /// Returns the ids of the new jobs.
    pub fn enqueue(&self, files: impl IntoIterator<Item = UploadedFile>) -> Vec<String> {
        let mut jobs = self.write();
        let mut ids = Vec::new();

        for file in files {
            let job = Job::new(file);
            log::debug!(
                "Enqueued job {} ({}, {})",
                job.id,
                job.name,
                job.file_type
            );

            let position = jobs.ordered.len();
            jobs.index.insert(job.id.clone(), position);
            ids.push(job.id.clone());
            self.events.send(JobEvent::enqueued(job.clone()));
            jobs.ordered.push(job);
        }

        ids
    }

    /// Applies `patch` to the job with `id`.
    ///
    /// Unknown ids are ignored; returns whether a job was updated.
    pub fn update(&self, id: &str, patch: JobPatch) -> bool {
        let mut jobs = self.write();

        let Some(&position) = jobs.index.get(id) else {
            log::debug!("Dropping update for unknown job {}", id);
            return false;
        };

        let job = &mut jobs.ordered[position];
        job.apply(&patch);
        self.events.send(JobEvent::updated(job.clone()));
        true
    }

    /// Discards every job, returning how many were removed.
    pub fn clear(&self) -> usize {
        let mut jobs = self.write();
        let discarded = jobs.ordered.len();
        jobs.ordered.clear();
        jobs.index.clear();
        self.events.send(JobEvent::cleared(discarded));

        if discarded > 0 {
            log::info!("Cleared {} job(s) from the store", discarded);
        }
        discarded
    }

    /// Snapshot of all jobs in order.
    pub fn jobs(&self) -> Vec<Job> {
        self.read().ordered.clone()
    }

    pub fn get(&self, id: &str) -> Option<Job> {
        let jobs = self.read();
        jobs.index.get(id).map(|&i| jobs.ordered[i].clone())
    }

    /// Jobs a batch run would pick up (pending or failed), in order.
    pub fn eligible(&self) -> Vec<Job> {
        self.read()
            .ordered
            .iter()
            .filter(|job| job.status.is_eligible())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.events.subscribe()
    }

    /// Claims the store for a batch run.
    ///
    /// Returns `None` while another run, from any runner, holds it.
    pub fn try_begin_batch(&self) -> Option<BatchGuard<'_>> {
        self.batch_running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BatchGuard { store: self })
    }

    pub fn is_batch_running(&self) -> bool {
        self.batch_running.load(Ordering::Acquire)
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}
