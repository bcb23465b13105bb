//! Public URLs for stored files.
//!
//! Composition is pure: no I/O and no check that the file still exists.

use crate::config::UploadSettings;
use crate::models::UploadCategory;

/// Builds retrieval URLs from the active environment.
///
/// Production uses the configured `BASE_URL`; every other environment points at
/// the local development server on the configured port.
#[derive(Clone, Debug)]
pub struct AccessUrlBuilder {
    base_url: String,
}

impl AccessUrlBuilder {
    pub fn new(settings: &UploadSettings) -> Self {
        let base_url = match (&settings.base_url, settings.is_production()) {
            (Some(base_url), true) => base_url.trim_end_matches('/').to_string(),
            _ => format!("http://localhost:{}", settings.server_port),
        };
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/uploads/{dir}/{filename}`, or `None` for an empty filename.
    pub fn build(&self, filename: Option<&str>, category: UploadCategory) -> Option<String> {
        let filename = filename.filter(|f| !f.is_empty())?;
        Some(format!(
            "{}/uploads/{}/{}",
            self.base_url,
            category.directory(),
            filename
        ))
    }

    /// `{base}/upload/{alias}/{filename}`; serves the same file as [`Self::build`].
    pub fn build_alias(&self, filename: Option<&str>, category: UploadCategory) -> Option<String> {
        let filename = filename.filter(|f| !f.is_empty())?;
        Some(format!(
            "{}/upload/{}/{}",
            self.base_url,
            category.alias(),
            filename
        ))
    }
}
