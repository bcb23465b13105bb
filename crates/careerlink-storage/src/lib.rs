//! CareerLink Storage Library
//!
//! This crate provides the storage abstraction for uploaded files and its local
//! filesystem implementation.
//!
//! # Layout
//!
//! Files live at `{upload_root}/{category_dir}/{filename}`, where the directory
//! comes from [`UploadCategory::directory`] and the filename is generated by
//! [`keys::generate_filename`]. Filenames must be a single path component.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use careerlink_core::UploadCategory;
pub use local::LocalStorage;
pub use traits::{ByteStream, Storage, StorageError, StorageResult};
