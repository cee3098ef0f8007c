//! Configuration module
//!
//! Environment-variable driven configuration for the API binary.
//! `.env` files are honored via dotenvy; every field has a development
//! default so a bare `cargo run` serves out of `./public`.

use std::env;
use std::path::PathBuf;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_STORAGE_ROOT: &str = "public";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Root directory holding `documents/` and `images/gallery/`.
    pub storage_root: PathBuf,
    /// Base URL prepended to storage keys when building public URLs.
    pub public_base_url: String,
    /// Optional JSON file with externally hosted photo records that are
    /// listed ahead of the directory scan.
    pub external_photos_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let server_port = match env::var("SERVER_PORT") {
            Ok(value) => value
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid SERVER_PORT '{}': {}", value, e))?,
            Err(_) => DEFAULT_SERVER_PORT,
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server_port,
            cors_origins,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            storage_root: env::var("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_ROOT)),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string()),
            external_photos_path: env::var("EXTERNAL_PHOTOS_PATH").ok().map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.public_base_url.is_empty() {
            anyhow::bail!("PUBLIC_BASE_URL must not be empty");
        }
        if self.storage_root.as_os_str().is_empty() {
            anyhow::bail!("STORAGE_ROOT must not be empty");
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
