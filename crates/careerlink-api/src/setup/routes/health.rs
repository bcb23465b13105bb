//! Health check handlers and response types.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const TIMEOUT: Duration = Duration::from_secs(5);
const CHECK_FILE_PREFIX: &str = ".health-check";

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub environment: String,
    pub storage: String,
}

/// Write and remove a check file in the upload root.
///
/// Each check gets its own file so overlapping checks never remove each other's.
async fn check_upload_root_writable(root: PathBuf) -> std::io::Result<()> {
    let check_file = root.join(format!("{}-{}", CHECK_FILE_PREFIX, Uuid::new_v4()));
    tokio::fs::write(&check_file, b"ok").await?;
    tokio::fs::remove_file(&check_file).await
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Health check - the upload root exists and is writable.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let root = state.uploads.storage().root().to_path_buf();
    let storage = run_check(TIMEOUT, check_upload_root_writable(root), "unhealthy").await;

    let healthy = storage == "healthy";
    if !healthy {
        tracing::error!(storage = %storage, "Upload root health check failed");
    }

    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        environment: state.config.environment().to_string(),
        storage,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
