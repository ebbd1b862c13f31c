pub mod firebase;
pub mod toml_config;

pub use firebase::FirebaseConfig;

pub const DEFAULT_SOURCE_DIR: &str = "./sample_videos";
pub const DEFAULT_EXTENSION: &str = ".mp4";
pub const DEFAULT_KEY_PREFIX: &str = "videos/";

#[cfg(feature = "cli")]
mod cli_args {
    use super::{FirebaseConfig, DEFAULT_EXTENSION, DEFAULT_KEY_PREFIX, DEFAULT_SOURCE_DIR};
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_file_extension, validate_key_prefix, validate_path, Validate,
    };
    use clap::Parser;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "video-uploader")]
    #[command(about = "Upload a directory of videos to Firebase Storage")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Directory scanned (non-recursively) for videos
        #[arg(long)]
        pub source_dir: Option<String>,

        /// File name suffix that marks a file as eligible
        #[arg(long)]
        pub extension: Option<String>,

        /// Prefix prepended to each file name to form the object key
        #[arg(long)]
        pub key_prefix: Option<String>,

        #[command(flatten)]
        pub firebase: FirebaseConfig,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log process CPU and memory usage")]
        pub monitor: bool,

        #[arg(long, help = "List the files that would be uploaded and exit")]
        pub dry_run: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub json_logs: bool,
    }

    impl ConfigProvider for CliConfig {
        fn source_dir(&self) -> &str {
            self.source_dir.as_deref().unwrap_or(DEFAULT_SOURCE_DIR)
        }

        fn file_extension(&self) -> &str {
            self.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
        }

        fn key_prefix(&self) -> &str {
            self.key_prefix.as_deref().unwrap_or(DEFAULT_KEY_PREFIX)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("source_dir", self.source_dir())?;
            validate_file_extension("extension", self.file_extension())?;
            validate_key_prefix("key_prefix", self.key_prefix())?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults_match_original_layout() {
            let config = CliConfig::parse_from(["video-uploader"]);

            assert_eq!(config.source_dir(), "./sample_videos");
            assert_eq!(config.file_extension(), ".mp4");
            assert_eq!(config.key_prefix(), "videos/");
            assert!(config.firebase.storage_bucket.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_parse_flags() {
            let config = CliConfig::parse_from([
                "video-uploader",
                "--source-dir",
                "/data/clips",
                "--bucket",
                "demo.firebasestorage.app",
                "--storage-host",
                "http://127.0.0.1:9199",
                "--dry-run",
            ]);

            assert_eq!(config.source_dir(), "/data/clips");
            assert_eq!(
                config.firebase.storage_bucket.as_deref(),
                Some("demo.firebasestorage.app")
            );
            assert_eq!(config.firebase.storage_host(), "http://127.0.0.1:9199");
            assert!(config.dry_run);
        }

        #[test]
        fn test_verbose_dump_hides_auth_token() {
            let config = CliConfig::parse_from([
                "video-uploader",
                "--verbose",
                "--auth-token",
                "id-token-value",
            ]);

            let printed = format!("{:?}", config);
            assert!(!printed.contains("id-token-value"));
            assert!(printed.contains("auth_token: Some(\"<redacted>\")"));
        }

        #[test]
        fn test_invalid_extension_rejected() {
            let config = CliConfig::parse_from(["video-uploader", "--extension", "mp4"]);
            assert!(config.validate().is_err());
        }
    }
}

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;
