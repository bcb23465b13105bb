//! Generated filenames.
//!
//! Format: `{category}-{unixMillis}-{random}.{ext}` with `random` in `[0, 1e9)`.
//! Stored references depend on this exact shape.

use careerlink_core::UploadCategory;
use rand::Rng;

/// Extension of the original filename, if it is plain ASCII alphanumeric.
pub fn original_extension(original_filename: &str) -> Option<&str> {
    let name = original_filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_filename);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}

/// Generate a fresh filename for `category`, keeping the original extension.
///
/// Uniqueness is best effort: two uploads in the same millisecond collide only
/// if they also draw the same random suffix.
pub fn generate_filename(category: UploadCategory, original_filename: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    match original_extension(original_filename) {
        Some(ext) => format!("{}-{}-{}.{}", category.as_str(), millis, suffix, ext),
        None => format!("{}-{}-{}", category.as_str(), millis, suffix),
    }
}
