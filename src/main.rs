use clap::Parser;
use std::path::Path;
use video_uploader::core::uploader::{discover, storage_key};
use video_uploader::core::ConfigProvider;
use video_uploader::utils::error::UploaderError;
use video_uploader::utils::{logger, monitor::SystemMonitor, validation::Validate};
use video_uploader::{
    BatchUploader, CliConfig, FirebaseConfig, FirebaseStorage, LocalFileSystem, TomlConfig,
};

struct RunOptions {
    dry_run: bool,
    monitor: bool,
}

#[tokio::main]
async fn main() {
    let args = CliConfig::parse();

    // 載入 TOML 配置 (若有指定)
    let file_config = match &args.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    // 初始化日誌
    let json_logs = args.json_logs || file_config.as_ref().is_some_and(TomlConfig::json_logs);
    if json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting video-uploader");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    let result = match file_config {
        Some(mut config) => {
            tracing::info!("📁 Loaded configuration from {}", args.config.as_deref().unwrap_or("?"));
            config.apply_cli_overrides(&args);
            let options = RunOptions {
                dry_run: args.dry_run,
                monitor: args.monitor || config.monitoring_enabled(),
            };
            let firebase = config.firebase.clone();
            run(config, firebase, options).await
        }
        None => {
            let options = RunOptions {
                dry_run: args.dry_run,
                monitor: args.monitor,
            };
            let firebase = args.firebase.clone();
            run(args, firebase, options).await
        }
    };

    if let Err(e) = result {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ Upload run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }
}

async fn run<C>(config: C, firebase: FirebaseConfig, options: RunOptions) -> Result<(), UploaderError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;
    let source_dir = config.source_dir().to_string();

    if options.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be uploaded");
        return perform_dry_run(&config).await;
    }

    firebase.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let monitor = SystemMonitor::new(options.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let store = FirebaseStorage::new(&firebase)?;
    tracing::info!("☁️ Target bucket: {}", store.bucket());

    let uploader = BatchUploader::new(LocalFileSystem::new(), store, config);
    monitor.log_stats("Batch start");

    // 每個檔案的結果已逐行記錄，不另外輸出統計
    uploader.upload_all(Path::new(&source_dir)).await?;

    monitor.log_stats("Batch end");
    monitor.log_final_stats();
    Ok(())
}

async fn perform_dry_run<C: ConfigProvider>(config: &C) -> Result<(), UploaderError> {
    let files = discover(
        &LocalFileSystem::new(),
        Path::new(config.source_dir()),
        config.file_extension(),
    )
    .await?;

    println!("🔍 Dry Run Analysis:");
    println!("  Source: {}", config.source_dir());
    println!("  Extension: {}", config.file_extension());
    println!("  Files: {}", files.len());
    for file in &files {
        println!(
            "  {} -> {}",
            file.path.display(),
            storage_key(config.key_prefix(), &file.file_name)
        );
    }

    Ok(())
}
