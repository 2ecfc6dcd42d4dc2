//! Configuration module
//!
//! Settings are read once at startup from the process environment (and an
//! optional `.env` file) into an immutable [`Config`] that is handed to the
//! router and middleware constructors.

use std::env;
use std::path::{Path, PathBuf};

const SERVER_PORT: u16 = 4000;
const UPLOAD_DIR: &str = "uploads";
const UPLOAD_FILENAME_PREFIX: &str = "test-image";
const WEBP_QUALITY: f32 = 50.0;
const MAX_FILE_SIZE_MB: usize = 10;

/// Origins of the deployed front-ends. Used when `CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5050",
    "http://client.api.localhost:3000",
    "http://localhost:5173",
    "https://4nxxvf8x-5173.euw.devtunnels.ms",
    "https://4nxxvf8x-3000.euw.devtunnels.ms",
    "https://dev.onemarket.in.ua",
    "https://admin.onemarket.in.ua",
    "https://dev-test.onemarket.in.ua",
    "https://admin-test.onemarket.in.ua",
    "https://bbrdq16w-3000.euw.devtunnels.ms",
    "https://w6cztjdb-3000.euw.devtunnels.ms",
    "https://d0q47hgp-5050.euw.devtunnels.ms",
];

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Shared secret expected in the `x-api-key` header for mutating routes.
    pub api_key: String,
    pub upload_dir: PathBuf,
    pub upload_filename_prefix: String,
    /// Lossy WebP quality on a 0-100 scale.
    pub webp_quality: f32,
    pub max_file_size_bytes: usize,
    pub cors_origins: Vec<String>,
    pub cors_allow_credentials: bool,
    pub environment: String,
}

impl Config {
    /// Load configuration from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let api_key = lookup("API_KEY")
            .ok_or_else(|| anyhow::anyhow!("API_KEY must be set for protected routes"))?;

        let webp_quality = match lookup("WEBP_QUALITY") {
            Some(q) => q
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("WEBP_QUALITY must be a number between 0 and 100"))?,
            None => WEBP_QUALITY,
        };

        let max_file_size_mb = match lookup("MAX_FILE_SIZE_MB") {
            Some(mb) => mb
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("MAX_FILE_SIZE_MB must be a whole number of megabytes"))?,
            None => MAX_FILE_SIZE_MB,
        };
        let max_file_size_bytes = max_file_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_FILE_SIZE_MB is too large: {}", max_file_size_mb))?;

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        let cors_allow_credentials = lookup("CORS_ALLOW_CREDENTIALS")
            .map(|s| parse_bool(&s))
            .unwrap_or(true);

        let config = Config {
            server_port,
            api_key,
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(UPLOAD_DIR)),
            upload_filename_prefix: lookup("UPLOAD_FILENAME_PREFIX")
                .unwrap_or_else(|| UPLOAD_FILENAME_PREFIX.to_string()),
            webp_quality,
            max_file_size_bytes,
            cors_origins,
            cors_allow_credentials,
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("API_KEY must not be empty"));
        }

        if !(0.0..=100.0).contains(&self.webp_quality) {
            return Err(anyhow::anyhow!(
                "WEBP_QUALITY must be between 0 and 100, got {}",
                self.webp_quality
            ));
        }

        let prefix = &self.upload_filename_prefix;
        if prefix.is_empty() || prefix.contains(['/', '\\']) || prefix.contains("..") {
            return Err(anyhow::anyhow!(
                "UPLOAD_FILENAME_PREFIX must be a plain, non-empty file name fragment"
            ));
        }

        if self.allows_any_origin() {
            if self.cors_allow_credentials {
                return Err(anyhow::anyhow!(
                    "CORS_ORIGINS cannot contain '*' while CORS_ALLOW_CREDENTIALS is enabled"
                ));
            }
            if self.is_production() {
                return Err(anyhow::anyhow!(
                    "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
                ));
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
