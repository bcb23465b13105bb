//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use careerlink_core::Config;

/// Validate critical configuration values
///
/// Runs the core checks, then the ones that only matter to the HTTP server.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();
    let env_var = std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .ok();

    if is_production && env_var.is_none() {
        tracing::warn!(
            "Production mode detected but ENVIRONMENT/APP_ENV not set - error details may leak"
        );
    }

    if is_production && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    if config.http_concurrency_limit == 0 {
        return Err(anyhow::anyhow!("HTTP concurrency limit cannot be 0"));
    }

    if config.max_file_size() > 100 * 1024 * 1024 {
        tracing::warn!(
            max_file_size = config.max_file_size(),
            "MAX_FILE_SIZE is above 100 MiB - uploads are buffered in memory before writing"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerlink_core::UploadSettings;

    fn config(upload: UploadSettings, cors_origins: &[&str]) -> Config {
        Config {
            upload,
            cors_origins: cors_origins.iter().map(|s| s.to_string()).collect(),
            http_concurrency_limit: 100,
        }
    }

    #[test]
    fn test_development_wildcard_cors_allowed() {
        assert!(validate_config(&config(UploadSettings::new("uploads"), &["*"])).is_ok());
    }

    #[test]
    fn test_production_wildcard_cors_rejected() {
        let upload = UploadSettings::new("uploads").with_production_base_url("https://careers.example");
        assert!(validate_config(&config(upload.clone(), &["*"])).is_err());
        assert!(validate_config(&config(upload, &["https://careers.example"])).is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = config(UploadSettings::new("uploads"), &["*"]);
        config.http_concurrency_limit = 0;
        assert!(validate_config(&config).is_err());
    }
}
