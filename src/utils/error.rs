use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploaderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Cannot read source directory {path}: {source}")]
    EnumerationError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Store rejected upload of {key} (HTTP {status}): {body}")]
    UploadRejected {
        key: String,
        status: u16,
        body: String,
    },

    #[error("Cannot resolve download URL for {key}: {message}")]
    UrlResolutionError { key: String, message: String },

    #[error("Upload of {file} failed: {source}")]
    UploadFailed {
        file: String,
        #[source]
        source: Box<UploaderError>,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FileSystem,
    Network,
    Storage,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl UploaderError {
    /// 將包裝在 UploadFailed 裡的原始錯誤取出
    pub fn root_cause(&self) -> &UploaderError {
        match self {
            UploaderError::UploadFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            UploaderError::HttpError(_) => ErrorCategory::Network,
            UploaderError::IoError(_) | UploaderError::EnumerationError { .. } => {
                ErrorCategory::FileSystem
            }
            UploaderError::SerializationError(_) => ErrorCategory::Data,
            UploaderError::UploadRejected { .. } | UploaderError::UrlResolutionError { .. } => {
                ErrorCategory::Storage
            }
            UploaderError::UploadFailed { source, .. } => source.category(),
            UploaderError::UrlError(_)
            | UploaderError::ConfigValidationError { .. }
            | UploaderError::InvalidConfigValueError { .. }
            | UploaderError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 無法列舉目錄時整批中止
            UploaderError::EnumerationError { .. } => ErrorSeverity::Critical,
            UploaderError::HttpError(_)
            | UploaderError::UploadRejected { .. }
            | UploaderError::UrlResolutionError { .. }
            | UploaderError::UploadFailed { .. } => ErrorSeverity::Medium,
            UploaderError::SerializationError(_) => ErrorSeverity::Medium,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.root_cause() {
            UploaderError::EnumerationError { path, .. } => {
                format!("Source directory '{}' could not be read", path)
            }
            UploaderError::UploadRejected { key, status, .. } => {
                format!("Storage rejected '{}' with HTTP status {}", key, status)
            }
            UploaderError::UrlResolutionError { key, .. } => {
                format!("Uploaded '{}' but could not obtain its download URL", key)
            }
            UploaderError::HttpError(_) => "Could not reach the storage service".to_string(),
            UploaderError::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.root_cause() {
            UploaderError::EnumerationError { .. } => {
                "Check that the source directory exists and is readable (--source-dir)"
            }
            UploaderError::UploadRejected { status, .. } if *status == 401 || *status == 403 => {
                "Check the storage security rules or pass a valid --auth-token"
            }
            UploaderError::UploadRejected { .. } => {
                "Check the bucket name and the storage quota for the project"
            }
            UploaderError::UrlResolutionError { .. } => {
                "Make sure the uploaded object has a download token and read access is allowed"
            }
            UploaderError::HttpError(_) => "Check your network connection and --storage-host",
            UploaderError::IoError(_) => "Check that the file exists and is readable",
            UploaderError::SerializationError(_) => {
                "The storage service returned an unexpected response"
            }
            _ => "Review the configuration file and command-line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, UploaderError>;
