pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FirebaseStorage, LocalFileSystem};
pub use config::{toml_config::TomlConfig, FirebaseConfig};
pub use core::uploader::BatchUploader;
pub use domain::model::{SourceFile, UploadResult};
pub use utils::error::{Result, UploaderError};
