//! Download surface for completed jobs.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::job::{Job, JobStatus};

const MAX_NAME_ATTEMPTS: usize = 1000;

/// Download name for a job's translation: `translated_{name}`.
pub fn artifact_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    format!("translated_{}", base)
}

/// Translated text of a COMPLETED job.
pub fn artifact_content(job: &Job) -> Result<&str, ExportError> {
    match (job.status, job.translated_content.as_deref()) {
        (JobStatus::Completed, Some(content)) => Ok(content),
        _ => Err(ExportError::NotCompleted(job.name.clone())),
    }
}

/// Writes the job's translation into `dir` and returns the created path.
///
/// An existing file is never overwritten; `translated_a_2.txt`,
/// `translated_a_3.txt`, ... are tried instead.
pub fn write_artifact(job: &Job, dir: &Path) -> Result<PathBuf, ExportError> {
    let content = artifact_content(job)?;

    std::fs::create_dir_all(dir).map_err(|e| ExportError::CreateDirectory {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let filename = artifact_name(&job.name);
    let (base, ext) = match filename.rfind('.') {
        Some(dot) => (&filename[..dot], Some(&filename[dot..])),
        None => (filename.as_str(), None),
    };

    for counter in 1..=MAX_NAME_ATTEMPTS {
        let candidate = if counter == 1 {
            filename.clone()
        } else {
            match ext {
                Some(ext) => format!("{}_{}{}", base, counter, ext),
                None => format!("{}_{}", base, counter),
            }
        };
        let path = dir.join(&candidate);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(mut file) => {
                file.write_all(content.as_bytes())
                    .map_err(|e| ExportError::WriteFile {
                        path: path.clone(),
                        source: e,
                    })?;
                log::debug!("Wrote artifact {}", crate::sanitize::redact_path(&path));
                return Ok(path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(ExportError::WriteFile { path, source: e }),
        }
    }

    let path = dir.join(&filename);
    Err(ExportError::WriteFile {
        path,
        source: std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "too many artifacts with the same name",
        ),
    })
}
