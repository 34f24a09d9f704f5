use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::file_type::FileType;
use crate::intake::{FileSource, UploadedFile};

/// Status of a translation job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Processing,
    Translating,
    Completed,
    Error,
}

impl JobStatus {
    /// Whether a batch run picks up a job in this status.
    pub fn is_eligible(&self) -> bool {
        matches!(self, JobStatus::Pending | JobStatus::Error)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Processing | JobStatus::Translating)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            JobStatus::Pending => "Pending",
            JobStatus::Processing => "Parsing",
            JobStatus::Translating => "Translating",
            JobStatus::Completed => "Completed",
            JobStatus::Error => "Error",
        };
        f.pad(label)
    }
}

/// One submitted file moving through translation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub file_type: FileType,
    pub status: JobStatus,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_content: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub source: FileSource,
}

impl Job {
    /// Creates a pending job for a file, classifying it by name.
    pub fn new(file: UploadedFile) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_type: FileType::classify(&file.name),
            name: file.name,
            size: file.size,
            status: JobStatus::Pending,
            progress: 0,
            error_message: None,
            translated_content: None,
            created_at: Utc::now(),
            source: file.source,
        }
    }

    /// Applies the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &JobPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress.min(100);
        }
        if let Some(ref error_message) = patch.error_message {
            self.error_message = error_message.clone();
        }
        if let Some(ref translated_content) = patch.translated_content {
            self.translated_content = translated_content.clone();
        }
    }
}

/// Partial changes to a job.
///
/// `None` leaves a field as is. For the optional fields, `Some(None)`
/// clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPatch {
    pub status: Option<JobStatus>,
    pub progress: Option<u8>,
    pub error_message: Option<Option<String>>,
    pub translated_content: Option<Option<String>>,
}

impl JobPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn error_message(mut self, message: Option<String>) -> Self {
        self.error_message = Some(message);
        self
    }

    pub fn translated_content(mut self, content: Option<String>) -> Self {
        self.translated_content = Some(content);
        self
    }

    /// Picked up by a run. Clears leftovers from an earlier attempt.
    pub fn processing() -> Self {
        Self::new()
            .status(JobStatus::Processing)
            .progress(10)
            .error_message(None)
            .translated_content(None)
    }

    pub fn translating() -> Self {
        Self::new().status(JobStatus::Translating).progress(30)
    }

    pub fn completed(content: String) -> Self {
        Self::new()
            .status(JobStatus::Completed)
            .progress(100)
            .error_message(None)
            .translated_content(Some(content))
    }

    /// Progress is left at the last checkpoint.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new()
            .status(JobStatus::Error)
            .error_message(Some(message.into()))
            .translated_content(None)
    }
}
