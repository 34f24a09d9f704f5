//! File intake: turning user-selected files into uploadable handles.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use walkdir::WalkDir;

use crate::error::{IntakeError, ProcessError};

/// Where a file's bytes live.
#[derive(Debug, Clone)]
pub enum FileSource {
    /// A file on disk, read lazily when the job is processed.
    Path(PathBuf),
    /// Bytes already held in memory (e.g. received from an upload form).
    Memory(Arc<[u8]>),
}

impl FileSource {
    pub async fn read_bytes(&self) -> Result<Vec<u8>, ProcessError> {
        match self {
            FileSource::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|e| ProcessError::ReadDocument {
                        path: path.clone(),
                        source: e,
                    })
            }
            FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }

    /// Reads the content and decodes it as UTF-8 text.
    ///
    /// Invalid sequences are replaced with U+FFFD instead of failing.
    pub async fn read_text(&self) -> Result<String, ProcessError> {
        let bytes = self.read_bytes().await?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}

/// A file handle selected for translation.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub source: FileSource,
}

impl UploadedFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| IntakeError::Metadata {
            path: path.to_path_buf(),
            source: e,
        })?;

        if !metadata.is_file() {
            return Err(IntakeError::NotAFile(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(Self {
            name,
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes: Arc<[u8]> = bytes.into();
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }
}

/// Expands a list of paths into file handles.
///
/// Directories are walked recursively in file-name order; hidden entries
/// (names starting with `.`) inside them are skipped.
pub fn collect_files(paths: &[PathBuf]) -> Result<Vec<UploadedFile>, IntakeError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let walker = WalkDir::new(path)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));

            for entry in walker {
                let entry = entry.map_err(|e| IntakeError::ScanFailed {
                    path: path.clone(),
                    source: e,
                })?;
                if entry.file_type().is_file() {
                    files.push(UploadedFile::from_path(entry.path())?);
                }
            }
        } else {
            files.push(UploadedFile::from_path(path)?);
        }
    }

    debug!("Collected {} file(s) from {} path(s)", files.len(), paths.len());
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
