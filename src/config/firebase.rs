use crate::utils::error::Result;
use crate::utils::validation::{
    validate_bucket_name, validate_non_empty_string, validate_required_field, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_STORAGE_HOST: &str = "https://firebasestorage.googleapis.com";

/// Firebase web app settings. Field aliases accept the camelCase keys of the
/// console's `firebaseConfig` snippet, so it can be pasted into a TOML table.
/// Only `storage_bucket` is needed to reach Cloud Storage.
#[derive(Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct FirebaseConfig {
    #[serde(default, alias = "apiKey")]
    #[cfg_attr(feature = "cli", arg(skip))]
    pub api_key: Option<String>,

    #[serde(default, alias = "authDomain")]
    #[cfg_attr(feature = "cli", arg(skip))]
    pub auth_domain: Option<String>,

    #[serde(default, alias = "projectId")]
    #[cfg_attr(feature = "cli", arg(long, help = "Firebase project id"))]
    pub project_id: Option<String>,

    #[serde(default, alias = "storageBucket")]
    #[cfg_attr(feature = "cli", arg(long = "bucket", help = "Storage bucket, e.g. my-app.firebasestorage.app"))]
    pub storage_bucket: Option<String>,

    #[serde(default, alias = "messagingSenderId")]
    #[cfg_attr(feature = "cli", arg(skip))]
    pub messaging_sender_id: Option<String>,

    #[serde(default, alias = "appId")]
    #[cfg_attr(feature = "cli", arg(long, help = "Firebase app id, sent as X-Firebase-GMPID"))]
    pub app_id: Option<String>,

    #[serde(default, alias = "measurementId")]
    #[cfg_attr(feature = "cli", arg(skip))]
    pub measurement_id: Option<String>,

    #[serde(default, alias = "storageHost")]
    #[cfg_attr(feature = "cli", arg(long, help = "Storage REST host (emulator or proxy)"))]
    pub storage_host: Option<String>,

    #[serde(default, alias = "authToken")]
    #[cfg_attr(feature = "cli", arg(long, help = "Firebase ID token for authenticated uploads"))]
    pub auth_token: Option<String>,
}

impl FirebaseConfig {
    pub fn storage_host(&self) -> &str {
        self.storage_host.as_deref().unwrap_or(DEFAULT_STORAGE_HOST)
    }

    pub fn storage_bucket(&self) -> Result<&str> {
        validate_required_field("firebase.storage_bucket", &self.storage_bucket).map(|b| b.as_str())
    }

    /// 以 `overrides` 中有設定的欄位覆蓋目前的值
    pub fn merge(&mut self, overrides: &FirebaseConfig) {
        fn take(target: &mut Option<String>, value: &Option<String>) {
            if value.is_some() {
                target.clone_from(value);
            }
        }

        take(&mut self.api_key, &overrides.api_key);
        take(&mut self.auth_domain, &overrides.auth_domain);
        take(&mut self.project_id, &overrides.project_id);
        take(&mut self.storage_bucket, &overrides.storage_bucket);
        take(&mut self.messaging_sender_id, &overrides.messaging_sender_id);
        take(&mut self.app_id, &overrides.app_id);
        take(&mut self.measurement_id, &overrides.measurement_id);
        take(&mut self.storage_host, &overrides.storage_host);
        take(&mut self.auth_token, &overrides.auth_token);
    }
}

// 金鑰與 token 不寫進日誌
fn redacted(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}

impl fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("api_key", &redacted(&self.api_key))
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("storage_bucket", &self.storage_bucket)
            .field("messaging_sender_id", &self.messaging_sender_id)
            .field("app_id", &self.app_id)
            .field("measurement_id", &self.measurement_id)
            .field("storage_host", &self.storage_host)
            .field("auth_token", &redacted(&self.auth_token))
            .finish()
    }
}

impl Validate for FirebaseConfig {
    fn validate(&self) -> Result<()> {
        let bucket = self.storage_bucket()?;
        validate_bucket_name("firebase.storage_bucket", bucket)?;
        validate_url("firebase.storage_host", self.storage_host())?;

        if let Some(token) = &self.auth_token {
            validate_non_empty_string("firebase.auth_token", token)?;
        }
        Ok(())
    }
}
