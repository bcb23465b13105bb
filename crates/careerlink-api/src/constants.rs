//! API constants
//!
//! Upload and delete routes live under the versioned prefix; file-serving routes
//! keep the public `/uploads` and `/upload` paths that stored URLs point at.

/// API base path prefix (version-independent)
pub const API_BASE: &str = "/api";

/// Versioned prefix for upload management routes
pub const API_PREFIX: &str = "/api/v0";

/// Public path serving files by category directory
pub const UPLOADS_PATH: &str = "/uploads";

/// Public path serving files by category alias
pub const UPLOAD_ALIAS_PATH: &str = "/upload";

/// Allowance on top of `MAX_FILE_SIZE` for multipart boundaries and headers
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
