//! Upload intake service
//!
//! Validation runs to completion before any byte is written:
//! category → content type → size → store. Rejections never touch the disk.

use std::path::Path;
use std::sync::Arc;

use careerlink_core::{
    AccessUrlBuilder, IncomingFile, StoredFile, UploadCategory, UploadConstraint, UploadError,
    UploadSettings,
};
use careerlink_storage::{keys, Storage, StorageError};

/// Accepts, names and stores uploaded files per category.
///
/// Holds no per-request state; one instance is shared by every request.
pub struct UploadIntakeService {
    storage: Arc<dyn Storage>,
    settings: UploadSettings,
    urls: AccessUrlBuilder,
}

impl UploadIntakeService {
    pub fn new(storage: Arc<dyn Storage>, settings: UploadSettings) -> Self {
        let urls = AccessUrlBuilder::new(&settings);
        Self {
            storage,
            settings,
            urls,
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn constraint(&self, category: UploadCategory) -> UploadConstraint {
        UploadConstraint::for_category(category, self.settings.max_file_size)
    }

    /// Parse `category` and accept the file under it.
    pub async fn accept_upload(
        &self,
        category: &str,
        file: IncomingFile,
    ) -> Result<StoredFile, UploadError> {
        let category: UploadCategory = category.parse()?;
        self.accept(category, file).await
    }

    /// Validate and store a single file for `category`.
    pub async fn accept(
        &self,
        category: UploadCategory,
        file: IncomingFile,
    ) -> Result<StoredFile, UploadError> {
        self.check_content_type(category, &file.content_type)?;
        self.check_size(file.size())?;

        let filename = keys::generate_filename(category, &file.original_filename);
        let size = file.size() as u64;

        tracing::info!(
            category = %category,
            filename = %filename,
            original_filename = %file.original_filename,
            size_bytes = size,
            "Processing upload"
        );

        let path = self
            .storage
            .put(category, &filename, file.data)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, category = %category, filename = %filename, "Failed to store upload");
                UploadError::Filesystem(e.to_string())
            })?;

        Ok(StoredFile {
            filename,
            category,
            directory: category.directory(),
            path,
            size,
        })
    }

    /// Store a new file, then remove the one it replaces.
    ///
    /// The previous file is only removed once the new one is on disk, so a
    /// rejected upload leaves it in place. Failing to remove it is logged and
    /// does not fail the upload.
    pub async fn replace_upload(
        &self,
        category: UploadCategory,
        file: IncomingFile,
        previous: Option<&str>,
    ) -> Result<StoredFile, UploadError> {
        let stored = self.accept(category, file).await?;

        if let Some(previous) = previous.filter(|p| !p.is_empty() && *p != stored.filename) {
            if let Err(e) = self.delete_by_name(category, previous).await {
                tracing::warn!(
                    error = %e,
                    category = %category,
                    previous = %previous,
                    "Failed to remove replaced upload"
                );
            }
        }

        Ok(stored)
    }

    /// Content-type check on its own, so callers can reject before reading a body.
    pub fn check_content_type(
        &self,
        category: UploadCategory,
        content_type: &str,
    ) -> Result<(), UploadError> {
        if !category.accepts(content_type) {
            return Err(UploadError::UnsupportedType {
                category,
                content_type: content_type.to_string(),
            });
        }
        Ok(())
    }

    pub fn check_size(&self, size: usize) -> Result<(), UploadError> {
        if size > self.settings.max_file_size {
            return Err(UploadError::TooLarge {
                size,
                max: self.settings.max_file_size,
            });
        }
        Ok(())
    }

    pub fn build_access_url(&self, filename: Option<&str>, category: UploadCategory) -> Option<String> {
        self.urls.build(filename, category)
    }

    pub fn build_alias_url(&self, filename: Option<&str>, category: UploadCategory) -> Option<String> {
        self.urls.build_alias(filename, category)
    }

    /// Remove the file at `path` if one exists; `None` and missing files are no-ops.
    pub async fn delete_stored_file(&self, path: Option<&Path>) -> Result<(), StorageError> {
        match path {
            Some(path) => self.storage.delete_path(path).await,
            None => Ok(()),
        }
    }

    pub async fn delete_by_name(
        &self,
        category: UploadCategory,
        filename: &str,
    ) -> Result<(), StorageError> {
        let path = self.storage.resolve(category, filename)?;
        self.delete_stored_file(Some(&path)).await
    }
}
