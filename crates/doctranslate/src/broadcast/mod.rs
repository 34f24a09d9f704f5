//! Job state shared with renderers.
//!
//! The store owns the job collection; the broadcaster streams every change so
//! a UI, CLI, or any other integration can re-render after each mutation.

pub mod job_events;
pub mod job_store;

pub use job_events::{JobEvent, JobEventBroadcaster, JobEventKind};
pub use job_store::{BatchGuard, JobStore};
