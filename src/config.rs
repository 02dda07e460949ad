//! Startup configuration for memegle
//!
//! All configuration comes from the process environment. The GIPHY API key is
//! required; everything else has a default.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Environment variable holding the GIPHY API key
pub const API_KEY_VAR: &str = "GIPHY_API_KEY";

/// Environment variable overriding the GIPHY base URL
pub const BASE_URL_VAR: &str = "GIPHY_API_BASE_URL";

/// Environment variable overriding the cache directory
pub const CACHE_DIR_VAR: &str = "MEMEGLE_CACHE_DIR";

/// Base URL for the GIPHY GIF endpoints
pub const DEFAULT_BASE_URL: &str = "https://api.giphy.com/v1/gifs";

/// Number of GIFs requested per call, also the search page size
pub const DEFAULT_FETCH_COUNT: u32 = 16;

/// Content rating filter sent with every request (general audience)
pub const DEFAULT_RATING: &str = "g";

/// Language hint sent with search requests
pub const DEFAULT_LANGUAGE: &str = "en";

/// Store key reserved for the trending cache entry
pub const TRENDING_CACHE_KEY: &str = "giphy_trending_cache";

/// How long a cached trending result stays fresh
pub const TRENDING_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Errors raised while building the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API key variable is unset or empty
    #[error("GIPHY_API_KEY is not set in environment variables")]
    MissingApiKey,

    /// The base URL override could not be parsed
    #[error("Invalid GIPHY_API_BASE_URL '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// The base URL parsed but cannot carry path segments (e.g. `mailto:`)
    #[error("GIPHY_API_BASE_URL '{0}' cannot be used as a base URL")]
    UnsupportedBaseUrl(String),
}

/// Key and lifetime of the trending cache entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Store key the entry lives under
    pub key: String,
    /// Entries at least this old are stale
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key: TRENDING_CACHE_KEY.to_string(),
            ttl: TRENDING_CACHE_TTL,
        }
    }
}

/// Everything the application needs to talk to GIPHY
#[derive(Debug, Clone)]
pub struct Config {
    /// GIPHY API key sent as `api_key`
    pub api_key: String,
    /// Base URL the `trending` and `search` endpoints hang off
    pub base_url: Url,
    /// Explicit cache directory, `None` for the XDG default
    pub cache_dir: Option<PathBuf>,
    /// Trending cache key and TTL
    pub cache: CacheConfig,
}

impl Config {
    /// Builds the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup
    ///
    /// # Returns
    /// * `Ok(Config)` when the API key is present and the base URL parses
    /// * `Err(ConfigError::MissingApiKey)` when the key is absent or blank
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = match lookup(BASE_URL_VAR).filter(|value| !value.trim().is_empty()) {
            Some(value) => parse_base_url(&value)?,
            None => parse_base_url(DEFAULT_BASE_URL)?,
        };

        let cache_dir = lookup(CACHE_DIR_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_key,
            base_url,
            cache_dir,
            cache: CacheConfig::default(),
        })
    }

    /// Creates a configuration for a given key and base URL with default cache settings
    pub fn new(api_key: impl Into<String>, base_url: Url) -> Self {
        Self {
            api_key: api_key.into(),
            base_url,
            cache_dir: None,
            cache: CacheConfig::default(),
        }
    }
}

/// Parses a base URL, dropping any trailing slash so endpoints can be appended
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::UnsupportedBaseUrl(value.to_string()));
    }
    Ok(url)
}
