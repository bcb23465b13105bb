//! Error types module
//!
//! `UploadError` is the taxonomy of the upload intake path. `AppError` unifies it
//! with the remaining request-level failures so the API can render every error
//! through one `ErrorMetadata` description.

use std::io;

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::UploadCategory;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "FILE_TOO_LARGE")
    fn error_code(&self) -> &'static str;

    /// Whether the client can fix the request and try again
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Discriminant of [`UploadError`], serialised in API responses and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum UploadErrorKind {
    InvalidCategory,
    UnsupportedType,
    TooLarge,
    TooManyFiles,
    FilesystemError,
}

/// Rejection or failure of a single upload.
///
/// Every variant except `Filesystem` is raised before anything touches the disk.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Invalid upload category: {0}")]
    InvalidCategory(String),

    #[error("{}", .category.unsupported_type_message())]
    UnsupportedType {
        category: UploadCategory,
        content_type: String,
    },

    #[error("File exceeds the maximum allowed size of {max} bytes")]
    TooLarge {
        /// Bytes received before the upload was rejected
        size: usize,
        max: usize,
    },

    #[error("Only one file may be uploaded per request (field '{0}')")]
    TooManyFiles(String),

    #[error("Filesystem error: {0}")]
    Filesystem(String),
}

impl UploadError {
    pub fn kind(&self) -> UploadErrorKind {
        match self {
            UploadError::InvalidCategory(_) => UploadErrorKind::InvalidCategory,
            UploadError::UnsupportedType { .. } => UploadErrorKind::UnsupportedType,
            UploadError::TooLarge { .. } => UploadErrorKind::TooLarge,
            UploadError::TooManyFiles(_) => UploadErrorKind::TooManyFiles,
            UploadError::Filesystem(_) => UploadErrorKind::FilesystemError,
        }
    }

    /// Client-input errors are fixable by the caller; filesystem errors are not.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, UploadError::Filesystem(_))
    }
}

impl From<io::Error> for UploadError {
    fn from(err: io::Error) -> Self {
        UploadError::Filesystem(err.to_string())
    }
}

impl ErrorMetadata for UploadError {
    fn http_status_code(&self) -> u16 {
        match self {
            UploadError::InvalidCategory(_) | UploadError::TooManyFiles(_) => 400,
            UploadError::UnsupportedType { .. } => 415,
            UploadError::TooLarge { .. } => 413,
            UploadError::Filesystem(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            UploadError::InvalidCategory(_) => "INVALID_CATEGORY",
            UploadError::UnsupportedType { .. } => "UNSUPPORTED_MEDIA_TYPE",
            UploadError::TooLarge { .. } => "FILE_TOO_LARGE",
            UploadError::TooManyFiles(_) => "TOO_MANY_FILES",
            UploadError::Filesystem(_) => "FILESYSTEM_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        self.is_client_error()
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            UploadError::InvalidCategory(_) => {
                Some("Use one of: profilePhoto, resume, idCard, coverLetter, companyDocument")
            }
            UploadError::UnsupportedType { .. } => Some("Upload a file of an accepted type"),
            UploadError::TooLarge { .. } => Some("Reduce file size and try again"),
            UploadError::TooManyFiles(_) => Some("Send exactly one file per request"),
            UploadError::Filesystem(_) => Some("Contact support if this error persists"),
        }
    }

    fn client_message(&self) -> String {
        match self {
            UploadError::Filesystem(_) => "Failed to store uploaded file".to_string(),
            other => other.to_string(),
        }
    }

    fn is_sensitive(&self) -> bool {
        matches!(self, UploadError::Filesystem(_))
    }

    fn log_level(&self) -> LogLevel {
        match self {
            UploadError::Filesystem(_) => LogLevel::Error,
            _ => LogLevel::Debug,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// Upload errors describe themselves; client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Upload(e) => (
            e.http_status_code(),
            e.error_code(),
            e.is_recoverable(),
            e.suggested_action(),
            e.is_sensitive(),
            e.log_level(),
        ),
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the file name and category"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            true,
            Some("Send a smaller request body"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Upload(_) => "Upload",
            AppError::Storage(_) => "Storage",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Upload(e) => e.client_message(),
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_message_is_category_specific() {
        let err = UploadError::UnsupportedType {
            category: UploadCategory::Resume,
            content_type: "image/png".to_string(),
        };
        assert_eq!(err.kind(), UploadErrorKind::UnsupportedType);
        assert_eq!(err.http_status_code(), 415);
        assert!(err.client_message().contains("PDF, DOC, and DOCX"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_too_large_metadata() {
        let err = UploadError::TooLarge {
            size: 6 * 1024 * 1024,
            max: 5 * 1024 * 1024,
        };
        assert_eq!(err.kind(), UploadErrorKind::TooLarge);
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.error_code(), "FILE_TOO_LARGE");
        assert!(err.client_message().contains("5242880"));
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_filesystem_error_is_hidden_and_fatal() {
        let err = UploadError::from(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "permission denied",
        ));
        assert_eq!(err.kind(), UploadErrorKind::FilesystemError);
        assert!(!err.is_client_error());
        assert!(!err.is_recoverable());
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Failed to store uploaded file");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_app_error_delegates_to_upload_error() {
        let err = AppError::from(UploadError::TooManyFiles("resume".to_string()));
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "TOO_MANY_FILES");
        assert_eq!(err.error_type(), "Upload");
        assert!(err.client_message().contains("resume"));
    }

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("File not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "File not found");
        assert!(!err.is_sensitive());
    }

    #[test]
    fn test_payload_too_large_metadata() {
        let err = AppError::PayloadTooLarge("length limit exceeded".to_string());
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.error_code(), "PAYLOAD_TOO_LARGE");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "length limit exceeded");
    }

    #[test]
    fn test_internal_error_hides_message() {
        let err = AppError::Internal("disk on fire".to_string());
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.is_sensitive());
    }
}
