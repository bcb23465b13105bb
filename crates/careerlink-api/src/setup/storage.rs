//! Storage setup and initialization

use anyhow::Result;
use careerlink_core::Config;
use careerlink_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Create the upload root and the local storage backend over it.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!(
        upload_root = %config.upload.upload_root.display(),
        "Initializing local upload storage..."
    );
    let storage = LocalStorage::new(&config.upload.upload_root).await?;
    tracing::info!("Local upload storage initialized successfully");

    Ok(Arc::new(storage))
}
