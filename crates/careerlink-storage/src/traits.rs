//! Storage abstraction trait
//!
//! This module defines the Storage trait that upload backends implement.

use async_trait::async_trait;
use bytes::Bytes;
use careerlink_core::UploadCategory;
use futures::Stream;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunked file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Write-once store of uploaded files keyed by category and filename.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` as a new file and return its path.
    ///
    /// Creates the category directory when missing. Never overwrites an existing
    /// file, and removes the partially written file if the write fails.
    async fn put(
        &self,
        category: UploadCategory,
        filename: &str,
        data: Vec<u8>,
    ) -> StorageResult<PathBuf>;

    /// Check if a file exists
    async fn exists(&self, category: UploadCategory, filename: &str) -> StorageResult<bool>;

    /// Get the size in bytes of a stored file.
    async fn content_length(&self, category: UploadCategory, filename: &str)
        -> StorageResult<u64>;

    /// Read a stored file as a stream of chunks.
    async fn download_stream(
        &self,
        category: UploadCategory,
        filename: &str,
    ) -> StorageResult<ByteStream>;

    /// Remove the file at `path` if there is one. A missing file is not an error.
    async fn delete_path(&self, path: &Path) -> StorageResult<()>;

    /// Map a stored filename to its path without touching the disk.
    fn resolve(&self, category: UploadCategory, filename: &str) -> StorageResult<PathBuf>;

    /// Root directory all category directories live under.
    fn root(&self) -> &Path;
}
