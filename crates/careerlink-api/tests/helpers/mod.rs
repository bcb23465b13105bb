//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p careerlink-api`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use careerlink_api::constants;
use careerlink_api::setup::{build_state, routes};
use careerlink_core::{Config, UploadSettings};
use careerlink_storage::LocalStorage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const MIB: usize = 1024 * 1024;

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server and the upload root it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn category_dir(&self, dir: &str) -> PathBuf {
        self.temp_dir.path().join(dir)
    }

    /// Number of entries in a category directory; 0 when it does not exist.
    pub fn files_in(&self, dir: &str) -> usize {
        std::fs::read_dir(self.category_dir(dir))
            .map(|d| d.count())
            .unwrap_or(0)
    }

    /// POST one file for `category` in the field named after it.
    pub async fn upload(
        &self,
        category: &str,
        filename: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> TestResponse {
        let part = Part::bytes(data).file_name(filename).mime_type(mime_type);
        let form = MultipartForm::new().add_part(category.to_string(), part);
        self.server
            .post(&api_path(&format!("/uploads/{}", category)))
            .multipart(form)
            .await
    }
}

/// Setup test app over a temporary upload root with the default 5 MiB limit.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|settings| settings).await
}

/// Setup test app, adjusting the upload settings first.
pub async fn setup_test_app_with(
    configure: impl FnOnce(UploadSettings) -> UploadSettings,
) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let upload = configure(UploadSettings::new(temp_dir.path()));

    let config = Config {
        upload,
        cors_origins: vec!["*".to_string()],
        http_concurrency_limit: 100,
    };

    let storage = LocalStorage::new(temp_dir.path())
        .await
        .expect("Failed to create local storage");
    let state = build_state(config.clone(), Arc::new(storage));
    let app = routes::setup_routes(&config, state).expect("Failed to build router");

    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, temp_dir }
}
