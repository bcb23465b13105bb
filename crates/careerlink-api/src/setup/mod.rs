//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! so tests can build the same router over a temporary upload root.

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::services::upload::UploadIntakeService;
use crate::state::AppState;
use anyhow::{Context, Result};
use careerlink_core::Config;
use careerlink_storage::Storage;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first so validation failures are logged
    crate::telemetry::init_telemetry(config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    validation::validate_config(&config).context("Configuration validation failed")?;
    tracing::info!("Configuration loaded and validated successfully");

    let storage = storage::setup_storage(&config).await?;
    let state = build_state(config, storage);

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}

/// Wire the upload service over `storage`.
pub fn build_state(config: Config, storage: Arc<dyn Storage>) -> Arc<AppState> {
    let uploads = UploadIntakeService::new(storage, config.upload.clone());
    Arc::new(AppState::new(config, uploads))
}
