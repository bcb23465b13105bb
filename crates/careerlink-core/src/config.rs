//! Configuration module
//!
//! `Config` is read once from the environment at start-up. `UploadSettings` is
//! the slice of it that the upload service and URL builder need; tests build it
//! directly with a temporary upload root.

use std::env;
use std::path::PathBuf;

const SERVER_PORT: u16 = 5000;
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;
const UPLOAD_DIR: &str = "uploads";
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Values the upload intake service is constructed with.
#[derive(Clone, Debug)]
pub struct UploadSettings {
    pub upload_root: PathBuf,
    pub max_file_size: usize,
    pub environment: String,
    /// Public base URL used in production.
    pub base_url: Option<String>,
    /// Port used to compose the development base URL.
    pub server_port: u16,
}

impl UploadSettings {
    /// Development defaults rooted at `upload_root`.
    pub fn new(upload_root: impl Into<PathBuf>) -> Self {
        Self {
            upload_root: upload_root.into(),
            max_file_size: MAX_FILE_SIZE,
            environment: "development".to_string(),
            base_url: None,
            server_port: SERVER_PORT,
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: usize) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_production_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.environment = "production".to_string();
        self.base_url = Some(base_url.into());
        self
    }

    pub fn is_production(&self) -> bool {
        is_production_name(&self.environment)
    }
}

/// `production` or `prod`, in any case.
pub fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub upload: UploadSettings,
    pub cors_origins: Vec<String>,
    pub http_concurrency_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let upload = UploadSettings {
            upload_root: env::var("UPLOAD_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| UPLOAD_DIR.to_string())
                .into(),
            max_file_size: env::var("MAX_FILE_SIZE")
                .unwrap_or_else(|_| MAX_FILE_SIZE.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_FILE_SIZE must be a number of bytes"))?,
            environment,
            base_url: env::var("BASE_URL")
                .ok()
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
        };

        let config = Config {
            upload,
            cors_origins,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload.max_file_size == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE cannot be 0"));
        }

        if self.is_production() && self.upload.base_url.is_none() {
            return Err(anyhow::anyhow!(
                "BASE_URL must be set when running in production"
            ));
        }

        if let Some(base_url) = &self.upload.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(anyhow::anyhow!(
                    "BASE_URL must start with http:// or https://"
                ));
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        self.upload.is_production()
    }

    pub fn server_port(&self) -> u16 {
        self.upload.server_port
    }

    pub fn max_file_size(&self) -> usize {
        self.upload.max_file_size
    }

    pub fn environment(&self) -> &str {
        &self.upload.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(upload: UploadSettings) -> Config {
        Config {
            upload,
            cors_origins: vec!["*".to_string()],
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
        }
    }

    #[test]
    fn test_defaults() {
        let settings = UploadSettings::new("/tmp/uploads");
        assert_eq!(settings.max_file_size, 5_242_880);
        assert_eq!(settings.server_port, 5000);
        assert!(!settings.is_production());
    }

    #[test]
    fn test_production_requires_base_url() {
        let mut settings = UploadSettings::new("/tmp/uploads");
        settings.environment = "prod".to_string();
        assert!(config(settings).validate().is_err());

        let settings =
            UploadSettings::new("/tmp/uploads").with_production_base_url("https://careers.example");
        assert!(config(settings).validate().is_ok());
    }

    #[test]
    fn test_production_name_ignores_case() {
        for name in ["production", "Production", "PROD", "prod"] {
            assert!(is_production_name(name), "{}", name);
        }
        assert!(!is_production_name("staging"));

        let mut settings = UploadSettings::new("/tmp/uploads");
        settings.environment = "Production".to_string();
        assert!(settings.is_production());
    }

    #[test]
    fn test_zero_max_file_size_rejected() {
        let settings = UploadSettings::new("/tmp/uploads").with_max_file_size(0);
        assert!(config(settings).validate().is_err());
    }

    #[test]
    fn test_base_url_scheme_checked() {
        let settings =
            UploadSettings::new("/tmp/uploads").with_production_base_url("careers.example");
        assert!(config(settings).validate().is_err());
    }
}
