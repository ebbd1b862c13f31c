use crate::core::{DirEntry, SourceFs};
use crate::utils::error::{Result, UploaderError};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl SourceFs for LocalFileSystem {
    async fn list_entries(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let enumeration_error = |source| UploaderError::EnumerationError {
            path: dir.display().to_string(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(enumeration_error)? {
            let entry = entry.map_err(enumeration_error)?;

            // 非 UTF-8 檔名仍列出，上傳時會以錯誤回報
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();

            // only entries known to be directories are excluded; a dangling
            // symlink or unreadable entry stays a candidate and fails on read
            let is_dir = match fs::metadata(&path) {
                Ok(metadata) => metadata.is_dir(),
                Err(e) => {
                    tracing::debug!("Cannot inspect {}: {}", path.display(), e);
                    false
                }
            };

            entries.push(DirEntry { name, path, is_dir });
        }

        Ok(entries)
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let data = fs::read(path)?;
        Ok(data)
    }
}
