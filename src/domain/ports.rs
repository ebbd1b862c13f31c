use crate::domain::model::{DirEntry, StoredObject};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait SourceFs: Send + Sync {
    fn list_entries(
        &self,
        dir: &Path,
    ) -> impl std::future::Future<Output = Result<Vec<DirEntry>>> + Send;
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str)
        -> Result<StoredObject>;
    async fn download_url(&self, key: &str) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn source_dir(&self) -> &str;
    fn file_extension(&self) -> &str;
    fn key_prefix(&self) -> &str;
}
