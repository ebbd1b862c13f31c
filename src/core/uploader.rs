use crate::core::{ConfigProvider, ObjectStore, SourceFile, SourceFs, UploadResult};
use crate::utils::error::{Result, UploaderError};
use std::path::Path;

/// Uploads every eligible file of a directory to an object store, one at a time.
///
/// A failure on one file is logged and recorded in its [`UploadResult`]; the
/// batch moves on. Only a failure to list the directory aborts the run.
pub struct BatchUploader<F: SourceFs, O: ObjectStore, C: ConfigProvider> {
    fs: F,
    store: O,
    config: C,
}

impl<F: SourceFs, O: ObjectStore, C: ConfigProvider> BatchUploader<F, O, C> {
    pub fn new(fs: F, store: O, config: C) -> Self {
        Self { fs, store, config }
    }

    pub fn store(&self) -> &O {
        &self.store
    }

    /// Object key for a file name, e.g. `videos/a.mp4`.
    pub fn storage_key(&self, file_name: &str) -> String {
        storage_key(self.config.key_prefix(), file_name)
    }

    /// Eligible files of `directory`, sorted by name.
    pub async fn plan(&self, directory: &Path) -> Result<Vec<SourceFile>> {
        discover(&self.fs, directory, self.config.file_extension()).await
    }

    /// Uploads every eligible file in `directory` and returns one result per file.
    pub async fn upload_all(&self, directory: &Path) -> Result<Vec<UploadResult>> {
        let files = self.plan(directory).await?;
        tracing::info!(
            "Uploading {} file(s) from {}",
            files.len(),
            directory.display()
        );

        let mut results = Vec::with_capacity(files.len());
        for file in files {
            let result = match self.upload_one(&file.path).await {
                Ok(url) => UploadResult::Succeeded {
                    key: self.storage_key(&file.file_name),
                    file_name: file.file_name,
                    url,
                },
                Err(error) => {
                    tracing::error!("❌ Error uploading {}: {}", file.path.display(), error);
                    UploadResult::Failed {
                        file_name: file.file_name,
                        error,
                    }
                }
            };
            results.push(result);
        }

        Ok(results)
    }

    /// Uploads a single file and returns its public download URL.
    ///
    /// Local read errors, store rejections and URL lookups that fail are all
    /// reported as [`UploaderError::UploadFailed`] wrapping the cause.
    pub async fn upload_one(&self, path: &Path) -> Result<String> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| UploaderError::UploadFailed {
                file: path.display().to_string(),
                source: Box::new(UploaderError::IoError(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path has no UTF-8 file name",
                ))),
            })?;

        self.try_upload(path, file_name)
            .await
            .map_err(|source| UploaderError::UploadFailed {
                file: path.display().to_string(),
                source: Box::new(source),
            })
    }

    async fn try_upload(&self, path: &Path, file_name: &str) -> Result<String> {
        let key = self.storage_key(file_name);

        tracing::info!("Uploading {}...", file_name);
        let data = self.fs.read_file(path).await?;
        self.store
            .put_object(&key, data, content_type_for(file_name))
            .await?;

        let url = self.store.download_url(&key).await?;
        tracing::info!("✅ {} uploaded successfully!", file_name);
        tracing::info!("🔗 Download URL: {}", url);

        Ok(url)
    }
}

pub fn storage_key(prefix: &str, file_name: &str) -> String {
    format!("{}{}", prefix, file_name)
}

/// Lists `directory` (non-recursively) and keeps the entries whose name ends
/// with `extension`, except directories. The match is a case-sensitive suffix
/// test. Entries that cannot be inspected are kept so their read error is
/// reported by the upload.
pub async fn discover<F: SourceFs>(
    fs: &F,
    directory: &Path,
    extension: &str,
) -> Result<Vec<SourceFile>> {
    let entries = fs.list_entries(directory).await?;
    let total = entries.len();

    let mut files: Vec<SourceFile> = entries
        .into_iter()
        .filter(|entry| {
            let eligible = entry.name.ends_with(extension);
            if eligible && entry.is_dir {
                tracing::debug!("Skipping {}: directory", entry.name);
            }
            eligible && !entry.is_dir
        })
        .map(|entry| SourceFile {
            path: entry.path,
            file_name: entry.name,
        })
        .collect();
    // read_dir order is platform dependent
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    tracing::debug!(
        "Found {} {} file(s) among {} entries in {}",
        files.len(),
        extension,
        total,
        directory.display()
    );
    Ok(files)
}

/// Content type sent with an upload, chosen from the file name.
pub fn content_type_for(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".mp4") {
        "video/mp4"
    } else if lower.ends_with(".mov") {
        "video/quicktime"
    } else if lower.ends_with(".webm") {
        "video/webm"
    } else {
        "application/octet-stream"
    }
}
