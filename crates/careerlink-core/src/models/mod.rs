//! Upload domain models

pub mod category;
pub mod upload;

pub use category::{normalize_mime_type, UploadCategory};
pub use upload::{IncomingFile, StoredFile, StoredFileResponse, UploadConstraint};
