pub mod uploader;

pub use crate::domain::model::{DirEntry, SourceFile, StoredObject, UploadResult};
pub use crate::domain::ports::{ConfigProvider, ObjectStore, SourceFs};
pub use crate::utils::error::Result;
