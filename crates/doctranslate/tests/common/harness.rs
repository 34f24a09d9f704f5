#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use tokio::sync::broadcast;

use doctranslate::pipeline::{BatchRunner, Pipeline, PipelineConfig};
use doctranslate::{JobEvent, JobEventKind, JobStore, Translator, UploadedFile};

/// Isolated environment: temp directories, a store, and a runner wired to
/// the given translator with all simulated delays off.
pub struct TestHarness {
    temp_dir: TempDir,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub store: Arc<JobStore>,
    events: broadcast::Receiver<JobEvent>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_store(Arc::new(JobStore::new()))
    }

    pub fn with_store(store: Arc<JobStore>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let input_dir = temp_dir.path().join("input");
        let output_dir = temp_dir.path().join("output");
        std::fs::create_dir_all(&input_dir).expect("Failed to create input dir");

        let events = store.subscribe();
        Self {
            temp_dir,
            input_dir,
            output_dir,
            store,
            events,
        }
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_input(&self, filename: &str, content: &[u8]) -> PathBuf {
        let path = self.input_dir.join(filename);
        std::fs::write(&path, content).expect("Failed to write input file");
        path
    }

    /// Enqueues in-memory files and returns their ids.
    pub fn enqueue(&self, files: &[(&str, &str)]) -> Vec<String> {
        self.store.enqueue(
            files
                .iter()
                .map(|(name, content)| UploadedFile::from_bytes(*name, content.as_bytes().to_vec())),
        )
    }

    pub fn runner(&self, translator: Arc<dyn Translator>) -> BatchRunner {
        self.runner_with(PipelineConfig::without_delays(5000), translator)
    }

    pub fn runner_with(&self, config: PipelineConfig, translator: Arc<dyn Translator>) -> BatchRunner {
        BatchRunner::new(Pipeline::from_config(
            Arc::new(config),
            translator,
            self.store.clone(),
        ))
    }

    /// Drains every event published so far.
    pub fn drain_events(&mut self) -> Vec<JobEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Progress values of `Updated` events for one job, in publish order.
    pub fn progress_of(events: &[JobEvent], id: &str) -> Vec<u8> {
        events
            .iter()
            .filter_map(|e| match &e.kind {
                JobEventKind::Updated { job } if job.id == id => Some(job.progress),
                _ => None,
            })
            .collect()
    }
}
