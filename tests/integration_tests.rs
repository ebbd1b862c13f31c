use httpmock::prelude::*;
use regex::Regex;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};
use video_uploader::core::ConfigProvider;
use video_uploader::{
    BatchUploader, CliConfig, FirebaseConfig, FirebaseStorage, LocalFileSystem, TomlConfig,
    UploadResult, UploaderError,
};

fn write_videos(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), format!("bytes of {}", name)).unwrap();
    }
}

fn firebase_for(server: &MockServer) -> FirebaseConfig {
    FirebaseConfig {
        storage_bucket: Some("reel-test.firebasestorage.app".to_string()),
        storage_host: Some(server.base_url()),
        ..Default::default()
    }
}

fn cli_config(source_dir: &Path) -> CliConfig {
    CliConfig {
        source_dir: Some(source_dir.to_str().unwrap().to_string()),
        ..Default::default()
    }
}

/// Matches the metadata path of `{prefix}/{name}` whether or not the slash arrives encoded.
fn object_path(prefix: &str, name: &str) -> Regex {
    Regex::new(&format!(
        r"/o/{}(%2F|/){}$",
        regex::escape(prefix),
        regex::escape(name)
    ))
    .unwrap()
}

/// Mocks a successful upload and metadata lookup for one object name.
fn mock_object<'a>(server: &'a MockServer, name: &str, token: &str) -> (httpmock::Mock<'a>, httpmock::Mock<'a>) {
    let upload = server.mock(|when, then| {
        when.method(POST)
            .path("/v0/b/reel-test.firebasestorage.app/o")
            .query_param("name", format!("videos/{}", name));
        then.status(200).json_body(serde_json::json!({
            "name": format!("videos/{}", name),
            "bucket": "reel-test.firebasestorage.app",
            "contentType": "video/mp4",
            "downloadTokens": token
        }));
    });

    let metadata = server.mock(|when, then| {
        when.method(GET).path_matches(object_path("videos", name));
        then.status(200).json_body(serde_json::json!({
            "name": format!("videos/{}", name),
            "bucket": "reel-test.firebasestorage.app",
            "downloadTokens": token
        }));
    });

    (upload, metadata)
}

#[tokio::test]
async fn test_end_to_end_batch_upload() {
    let temp_dir = TempDir::new().unwrap();
    write_videos(temp_dir.path(), &["a.mp4", "b.mp4", "notes.txt"]);

    let server = MockServer::start();
    let (upload_a, metadata_a) = mock_object(&server, "a.mp4", "token-a");
    let (upload_b, metadata_b) = mock_object(&server, "b.mp4", "token-b");

    let store = FirebaseStorage::new(&firebase_for(&server)).unwrap();
    let config = cli_config(temp_dir.path());
    let source_dir = config.source_dir().to_string();
    let uploader = BatchUploader::new(LocalFileSystem::new(), store, config);

    let results = uploader.upload_all(Path::new(&source_dir)).await.unwrap();

    upload_a.assert_hits(1);
    upload_b.assert_hits(1);
    metadata_a.assert_hits(1);
    metadata_b.assert_hits(1);

    assert_eq!(results.len(), 2);
    match &results[0] {
        UploadResult::Succeeded { file_name, key, url } => {
            assert_eq!(file_name, "a.mp4");
            assert_eq!(key, "videos/a.mp4");
            assert!(url.contains("videos%2Fa.mp4"));
            assert!(url.ends_with("?alt=media&token=token-a"));
        }
        other => panic!("expected success, got {:?}", other),
    }
    assert_eq!(results[1].file_name(), "b.mp4");
    assert!(results[1].url().unwrap().contains("token=token-b"));
}

#[tokio::test]
async fn test_rejected_upload_does_not_abort_batch() {
    let temp_dir = TempDir::new().unwrap();
    write_videos(temp_dir.path(), &["a.mp4", "b.mp4", "c.mp4"]);

    let server = MockServer::start();
    let (upload_a, _) = mock_object(&server, "a.mp4", "token-a");
    let (upload_c, _) = mock_object(&server, "c.mp4", "token-c");
    let rejected = server.mock(|when, then| {
        when.method(POST).query_param("name", "videos/b.mp4");
        then.status(403).body("Permission denied.");
    });

    let store = FirebaseStorage::new(&firebase_for(&server)).unwrap();
    let uploader = BatchUploader::new(LocalFileSystem::new(), store, cli_config(temp_dir.path()));

    let results = uploader.upload_all(temp_dir.path()).await.unwrap();

    upload_a.assert();
    rejected.assert();
    upload_c.assert();

    let outcomes: Vec<(&str, bool)> = results
        .iter()
        .map(|r| (r.file_name(), r.is_success()))
        .collect();
    assert_eq!(
        outcomes,
        vec![("a.mp4", true), ("b.mp4", false), ("c.mp4", true)]
    );

    if let UploadResult::Failed { error, .. } = &results[1] {
        assert!(error.to_string().contains("HTTP 403"));
        assert_eq!(error.severity(), video_uploader::utils::error::ErrorSeverity::Medium);
    }
}

#[tokio::test]
async fn test_reupload_overwrites_same_key() {
    let temp_dir = TempDir::new().unwrap();
    write_videos(temp_dir.path(), &["a.mp4"]);

    let server = MockServer::start();
    let (upload, metadata) = mock_object(&server, "a.mp4", "token-a");

    let store = FirebaseStorage::new(&firebase_for(&server)).unwrap();
    let uploader = BatchUploader::new(LocalFileSystem::new(), store, cli_config(temp_dir.path()));

    let first = assert_ok!(uploader.upload_all(temp_dir.path()).await);
    let second = assert_ok!(uploader.upload_all(temp_dir.path()).await);

    upload.assert_hits(2);
    metadata.assert_hits(2);
    assert_eq!(first[0].url(), second[0].url());
}

#[tokio::test]
async fn test_missing_directory_makes_no_requests() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let any_request = server.mock(|_when, then| {
        then.status(500);
    });

    let store = FirebaseStorage::new(&firebase_for(&server)).unwrap();
    let missing = temp_dir.path().join("sample_videos");
    let uploader = BatchUploader::new(LocalFileSystem::new(), store, cli_config(&missing));

    let err = assert_err!(uploader.upload_all(&missing).await);

    assert!(matches!(err, UploaderError::EnumerationError { .. }));
    any_request.assert_hits(0);
}

#[tokio::test]
async fn test_toml_config_drives_prefix_and_extension() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    write_videos(temp_dir.path(), &["take1.mov", "take2.mp4"]);

    let server = MockServer::start();
    let upload = server.mock(|when, then| {
        when.method(POST)
            .query_param("name", "clips/take1.mov")
            .header("content-type", "video/quicktime");
        then.status(200).json_body(serde_json::json!({
            "name": "clips/take1.mov",
            "downloadTokens": "tok"
        }));
    });
    let metadata = server.mock(|when, then| {
        when.method(GET).path_matches(object_path("clips", "take1.mov"));
        then.status(200).json_body(serde_json::json!({
            "name": "clips/take1.mov",
            "downloadTokens": "tok"
        }));
    });

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[firebase]
storage_bucket = "reel-test.firebasestorage.app"
storage_host = "{}"

[upload]
source_dir = "{}"
extension = ".mov"
key_prefix = "clips/"
"#,
        server.base_url(),
        temp_dir.path().to_str().unwrap().replace('\\', "/")
    ))?;

    let store = FirebaseStorage::new(&config.firebase)?;
    let source_dir = config.source_dir().to_string();
    let uploader = BatchUploader::new(LocalFileSystem::new(), store, config);

    let results = uploader.upload_all(Path::new(&source_dir)).await?;

    upload.assert();
    metadata.assert();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].file_name(), "take1.mov");

    Ok(())
}

/// Runs the binary against `source_dir` with logging switched off.
fn run_binary(source_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_video-uploader"))
        .args([
            "--source-dir",
            source_dir.to_str().unwrap(),
            "--bucket",
            "reel-test.firebasestorage.app",
            "--storage-host",
            "http://127.0.0.1:9",
        ])
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn test_binary_prints_no_summary_after_batch() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_binary(temp_dir.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(
        output.stdout.is_empty(),
        "unexpected stdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn test_binary_exit_code_for_missing_directory() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_binary(&temp_dir.path().join("sample_videos"));

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not be read"));
}
