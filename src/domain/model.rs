use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An eligible file discovered by a directory scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
}

/// A raw directory entry as reported by a [`SourceFs`](crate::domain::ports::SourceFs).
/// `is_dir` is true only when the entry is known to be a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Outcome of one upload attempt. Every `SourceFile` yields exactly one.
#[derive(Debug)]
pub enum UploadResult {
    Succeeded {
        file_name: String,
        key: String,
        url: String,
    },
    Failed {
        file_name: String,
        error: crate::utils::error::UploaderError,
    },
}

impl UploadResult {
    pub fn file_name(&self) -> &str {
        match self {
            UploadResult::Succeeded { file_name, .. } | UploadResult::Failed { file_name, .. } => {
                file_name
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadResult::Succeeded { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            UploadResult::Succeeded { url, .. } => Some(url),
            UploadResult::Failed { .. } => None,
        }
    }
}

/// Object metadata returned by the store after a successful put.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    pub name: String,
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub download_tokens: Option<String>,
}

impl StoredObject {
    /// Firebase returns a comma-separated token list; the first one is used for URLs.
    pub fn first_download_token(&self) -> Option<&str> {
        self.download_tokens
            .as_deref()
            .and_then(|tokens| tokens.split(',').map(str::trim).find(|t| !t.is_empty()))
    }
}
