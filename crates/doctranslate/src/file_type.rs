//! File classification by extension and size formatting for job listings.

use serde::{Deserialize, Serialize};

/// Semantic file type used to choose how a job's content is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    #[serde(rename = "xlsx")]
    Excel,
    #[serde(rename = "docx")]
    Word,
    #[serde(rename = "csv")]
    Csv,
    #[serde(rename = "txt")]
    Text,
    #[serde(rename = "log")]
    Log,
    #[serde(rename = "unknown")]
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "xlsx" | "xls" => Self::Excel,
            "docx" | "doc" => Self::Word,
            "csv" => Self::Csv,
            "txt" => Self::Text,
            "log" => Self::Log,
            _ => Self::Unknown,
        }
    }

    /// Classifies a filename by the text after its last `.`.
    ///
    /// Names without a `.` are `Unknown`.
    pub fn classify(filename: &str) -> Self {
        match filename.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext),
            None => Self::Unknown,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            Self::Word => "docx",
            Self::Csv => "csv",
            Self::Text => "txt",
            Self::Log => "log",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the content can be decoded directly as character data.
    ///
    /// Excel is read as text even though `.xlsx` is a binary container.
    pub fn is_text_readable(&self) -> bool {
        matches!(self, Self::Text | Self::Csv | Self::Log | Self::Excel)
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excel => write!(f, "Excel"),
            Self::Word => write!(f, "Word"),
            Self::Csv => write!(f, "CSV"),
            Self::Text => write!(f, "Text"),
            Self::Log => write!(f, "Log"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Shorthand for [`FileType::classify`].
pub fn classify(filename: &str) -> FileType {
    FileType::classify(filename)
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a byte count as a short human-readable size (`1.5 KB`, `0 Bytes`).
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut divisor = 1u64;
    while unit + 1 < SIZE_UNITS.len() && bytes >= divisor * 1024 {
        divisor *= 1024;
        unit += 1;
    }

    let value = format!("{:.2}", bytes as f64 / divisor as f64);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", value, SIZE_UNITS[unit])
}
