use crate::config::{FirebaseConfig, DEFAULT_EXTENSION, DEFAULT_KEY_PREFIX, DEFAULT_SOURCE_DIR};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, UploaderError};
use crate::utils::validation::{
    validate_file_extension, validate_key_prefix, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub upload: UploadSection,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadSection {
    pub source_dir: Option<String>,
    pub extension: Option<String>,
    pub key_prefix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(UploaderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| UploaderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FIREBASE_API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 套用命令列參數，命令列優先於檔案
    #[cfg(feature = "cli")]
    pub fn apply_cli_overrides(&mut self, cli: &crate::config::CliConfig) {
        if cli.source_dir.is_some() {
            self.upload.source_dir.clone_from(&cli.source_dir);
        }
        if cli.extension.is_some() {
            self.upload.extension.clone_from(&cli.extension);
        }
        if cli.key_prefix.is_some() {
            self.upload.key_prefix.clone_from(&cli.key_prefix);
        }
        self.firebase.merge(&cli.firebase);
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn source_dir(&self) -> &str {
        self.upload.source_dir.as_deref().unwrap_or(DEFAULT_SOURCE_DIR)
    }

    fn file_extension(&self) -> &str {
        self.upload.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }

    fn key_prefix(&self) -> &str {
        self.upload.key_prefix.as_deref().unwrap_or(DEFAULT_KEY_PREFIX)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("upload.source_dir", self.source_dir())?;
        validate_file_extension("upload.extension", self.file_extension())?;
        validate_key_prefix("upload.key_prefix", self.key_prefix())?;
        Ok(())
    }
}
