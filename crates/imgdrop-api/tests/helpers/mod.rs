//! Test helpers: build AppState and router for integration tests.
//!
//! Every app gets its own temporary upload directory.
//! Run from workspace root: `cargo test -p imgdrop-api`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use imgdrop_api::setup;
use imgdrop_api::state::AppState;
use imgdrop_core::Config;
use imgdrop_processing::WebpTranscoder;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const TEST_API_KEY: &str = "test-api-key-0123456789";

/// Test application: server, state, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> &Path {
        self.state.config.upload_dir()
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.upload_dir().join(filename)
    }

    /// Names of the files currently in the upload directory, sorted.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// POST a single `file` part with the test API key.
    pub async fn upload(&self, bytes: Vec<u8>, file_name: &str, mime_type: &str) -> TestResponse {
        let part = Part::bytes(bytes::Bytes::from(bytes))
            .file_name(file_name)
            .mime_type(mime_type);
        self.client()
            .post("/uploads")
            .add_header("x-api-key", TEST_API_KEY)
            .multipart(MultipartForm::new().add_part("file", part))
            .await
    }

    /// Upload and return the `image_name` from a successful response.
    pub async fn upload_ok(&self, bytes: Vec<u8>, file_name: &str, mime_type: &str) -> String {
        let response = self.upload(bytes, file_name, mime_type).await;
        assert_eq!(response.status_code(), 200, "{}", response.text());
        let body: serde_json::Value = response.json();
        body["image_name"].as_str().unwrap().to_string()
    }
}

/// Setup test app with default configuration.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

/// Setup test app with extra environment overrides (e.g. `("MAX_FILE_SIZE_MB", "1")`).
pub async fn setup_test_app_with(overrides: &[(&str, &str)]) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let mut vars: HashMap<String, String> = HashMap::from([
        ("API_KEY".to_string(), TEST_API_KEY.to_string()),
        (
            "UPLOAD_DIR".to_string(),
            temp_dir.path().join("uploads").display().to_string(),
        ),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = Config::from_lookup(|key| vars.get(key).cloned()).expect("Invalid test config");
    let storage = setup::storage::setup_storage(&config)
        .await
        .expect("Failed to set up storage");
    let transcoder = Arc::new(WebpTranscoder::new(config.webp_quality));
    let state = Arc::new(AppState::new(config, storage, transcoder));

    let app = setup::routes::build_router(state.clone()).expect("Failed to build router");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
    }
}

/// Poll until `path` is gone; deferred cleanup runs after the response.
pub async fn wait_until_absent(path: &Path) -> bool {
    for _ in 0..100 {
        if !path.exists() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    !path.exists()
}

pub fn is_webp(data: &[u8]) -> bool {
    data.len() > 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP"
}
