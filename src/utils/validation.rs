use crate::utils::error::{Result, UploaderError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(UploaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(UploaderError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(UploaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(UploaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(UploaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Extensions are matched as a plain suffix, so they must carry the leading dot.
pub fn validate_file_extension(field_name: &str, extension: &str) -> Result<()> {
    if extension.len() < 2 || !extension.starts_with('.') {
        return Err(UploaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: extension.to_string(),
            reason: "Extension must start with '.' followed by at least one character"
                .to_string(),
        });
    }

    if extension.contains('/') {
        return Err(UploaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: extension.to_string(),
            reason: "Extension cannot contain '/'".to_string(),
        });
    }

    Ok(())
}

pub fn validate_key_prefix(field_name: &str, prefix: &str) -> Result<()> {
    if prefix.starts_with('/') {
        return Err(UploaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: prefix.to_string(),
            reason: "Object keys cannot start with '/'".to_string(),
        });
    }
    Ok(())
}

pub fn validate_bucket_name(field_name: &str, bucket: &str) -> Result<()> {
    validate_non_empty_string(field_name, bucket)?;

    if bucket.contains('/') || bucket.chars().any(char::is_whitespace) {
        return Err(UploaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket.to_string(),
            reason: "Bucket name cannot contain '/' or whitespace".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| UploaderError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(UploaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
