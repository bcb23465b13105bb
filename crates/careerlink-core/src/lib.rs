//! CareerLink Core Library
//!
//! This crate provides the upload domain model, error types, configuration and the
//! access-URL builder shared by the storage backend and the HTTP API.

pub mod config;
pub mod error;
pub mod models;
pub mod urls;

// Re-export commonly used types
pub use config::{Config, UploadSettings};
pub use error::{AppError, ErrorMetadata, LogLevel, UploadError, UploadErrorKind};
pub use models::{IncomingFile, StoredFile, StoredFileResponse, UploadCategory, UploadConstraint};
pub use urls::AccessUrlBuilder;
