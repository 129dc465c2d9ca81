//! Environment-driven configuration.
//!
//! Values are read once at startup; `.env` files are honoured through dotenvy.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w1280/";
pub const DEFAULT_DATABASE_URL: &str = "movie_showcase.db";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 40;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable not found")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub access_token: String,
    pub base_url: String,
    pub image_base_url: String,
    pub database_url: String,
    pub page_size: u32,
    pub search_debounce: Duration,
    pub http_timeout: Duration,
    pub requests_per_second: u32,
}

impl AppConfig {
    /// Load configuration from the process environment (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let access_token = env::var("TMDB_ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("TMDB_ACCESS_TOKEN"))?;

        let config = Self {
            access_token,
            base_url: env::var("TMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            image_base_url: env::var("TMDB_IMAGE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_BASE_URL.to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            page_size: parse_var("PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            search_debounce: Duration::from_millis(parse_var(
                "SEARCH_DEBOUNCE_MS",
                DEFAULT_SEARCH_DEBOUNCE_MS,
            )?),
            http_timeout: Duration::from_secs(parse_var(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            requests_per_second: parse_var(
                "TMDB_REQUESTS_PER_SECOND",
                DEFAULT_REQUESTS_PER_SECOND,
            )?,
        };

        config.validate()?;

        log::info!(
            "Configuration loaded (catalog: {}, database: {}, page size: {})",
            config.base_url,
            config.database_url,
            config.page_size
        );
        Ok(config)
    }

    /// Defaults with an in-memory database, for tests and demos.
    pub fn for_tests() -> Self {
        Self {
            access_token: "test-token".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            database_url: ":memory:".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
        }
    }

    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = database_url.into();
        self
    }

    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "PAGE_SIZE",
                value: self.page_size.to_string(),
            });
        }
        if self.requests_per_second == 0 {
            return Err(ConfigError::Invalid {
                key: "TMDB_REQUESTS_PER_SECOND",
                value: self.requests_per_second.to_string(),
            });
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "TMDB_BASE_URL",
                value: self.base_url.clone(),
            });
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}
