//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `KOPIKU_CATALOG_URL` - Catalog collection endpoint (default: the
//!   public mock API)
//! - `KOPIKU_DATA_DIR` - Directory for persisted state (default: the
//!   platform data directory, e.g. `~/.local/share/kopiku` on Linux)
//! - `KOPIKU_CACHE_TTL_SECS` - Catalog cache TTL in seconds (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use thiserror::Error;
use url::Url;

/// Default catalog collection endpoint.
pub const DEFAULT_CATALOG_URL: &str =
    "https://690aa9b41a446bb9cc234abf.mockapi.io/api/v1/coffee";

const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
    #[error("could not determine a data directory; set KOPIKU_DATA_DIR")]
    NoDataDir,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Catalog collection endpoint.
    pub catalog_url: Url,
    /// Directory persisted state (cart, session) lives under.
    pub data_dir: PathBuf,
    /// How long catalog responses are cached.
    pub cache_ttl: Duration,
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when a set variable fails to parse, or when no
    /// data directory can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        let catalog_url = match std::env::var("KOPIKU_CATALOG_URL") {
            Ok(raw) => Url::parse(&raw)
                .map_err(|e| ConfigError::InvalidEnvVar("KOPIKU_CATALOG_URL", e.to_string()))?,
            Err(_) => Url::parse(DEFAULT_CATALOG_URL)
                .map_err(|e| ConfigError::InvalidEnvVar("KOPIKU_CATALOG_URL", e.to_string()))?,
        };

        let data_dir = match std::env::var("KOPIKU_DATA_DIR") {
            Ok(raw) => PathBuf::from(raw),
            Err(_) => ProjectDirs::from("", "", "kopiku")
                .ok_or(ConfigError::NoDataDir)?
                .data_dir()
                .to_path_buf(),
        };

        let cache_ttl = match std::env::var("KOPIKU_CACHE_TTL_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse().map_err(
                |e: std::num::ParseIntError| {
                    ConfigError::InvalidEnvVar("KOPIKU_CACHE_TTL_SECS", e.to_string())
                },
            )?),
            Err(_) => Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        };

        Ok(Self {
            catalog_url,
            data_dir,
            cache_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_url_parses() {
        let url = Url::parse(DEFAULT_CATALOG_URL).expect("default URL is valid");
        assert_eq!(url.scheme(), "https");
    }
}
