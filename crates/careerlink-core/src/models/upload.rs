use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::category::UploadCategory;

/// A file received from a client, before validation.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub original_filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl IncomingFile {
    pub fn new(
        original_filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            original_filename: original_filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Per-category acceptance policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConstraint {
    pub allowed_content_types: &'static [&'static str],
    pub max_file_size: usize,
    pub max_files: usize,
}

impl UploadConstraint {
    /// Policy for `category` under the global per-file size limit.
    pub fn for_category(category: UploadCategory, max_file_size: usize) -> Self {
        Self {
            allowed_content_types: category.allowed_content_types(),
            max_file_size,
            max_files: 1,
        }
    }
}

/// A file written by the upload service.
///
/// Ownership is tracked by whoever stores `filename` on their own records; the
/// store itself is keyed by filename within the category directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub filename: String,
    pub category: UploadCategory,
    pub directory: &'static str,
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoredFileResponse {
    pub filename: String,
    pub category: UploadCategory,
    pub url: String,
    pub size: u64,
}
