//! GIPHY GIF endpoints
//!
//! `GifService` exposes the two operations the application needs: the cached
//! trending list and uncached keyword search.

use tracing::error;
use url::Url;

use super::client::{append_search_params, ApiClient, ApiError};
use crate::cache::TrendingCache;
use crate::config::{Config, DEFAULT_FETCH_COUNT, DEFAULT_LANGUAGE, DEFAULT_RATING};
use crate::data::{convert_records, GifImage, GifsResponse};

/// Fetches GIFs from GIPHY, caching the trending list
#[derive(Debug, Clone)]
pub struct GifService {
    client: ApiClient,
    base_url: Url,
    api_key: String,
    cache: TrendingCache,
}

impl GifService {
    /// Creates a service for `config` backed by `cache`
    pub fn new(config: &Config, cache: TrendingCache) -> Self {
        Self::with_client(ApiClient::new(), config, cache)
    }

    /// Creates a service with a custom transport
    pub fn with_client(client: ApiClient, config: &Config, cache: TrendingCache) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            cache,
        }
    }

    /// The trending cache this service reads and writes
    pub fn cache(&self) -> &TrendingCache {
        &self.cache
    }

    /// Returns the current trending GIFs
    ///
    /// Serves the cached list while it is fresh. Otherwise fetches
    /// `DEFAULT_FETCH_COUNT` general-audience GIFs and caches them. A failed
    /// cache write is logged and the fetched list is still returned; a failed
    /// fetch is returned as-is and nothing is cached.
    pub async fn get_trending(&self) -> Result<Vec<GifImage>, ApiError> {
        if let Some(cached) = self.cache.read() {
            return Ok(cached);
        }

        let limit = DEFAULT_FETCH_COUNT.to_string();
        let url = append_search_params(
            self.endpoint("trending"),
            &[
                ("api_key", self.api_key.as_str()),
                ("limit", limit.as_str()),
                ("rating", DEFAULT_RATING),
            ],
        );

        let data = self.fetch_gifs(url).await?;

        if let Err(e) = self.cache.write(&data) {
            error!(error = %e, "Failed to cache trending data");
        }

        Ok(data)
    }

    /// Searches GIFs matching `keyword`, one page of `DEFAULT_FETCH_COUNT` at a time
    ///
    /// `page` is zero-based; the request offset is `page * DEFAULT_FETCH_COUNT`.
    /// Never touches the cache.
    pub async fn search_by_keyword(
        &self,
        keyword: &str,
        page: u32,
    ) -> Result<Vec<GifImage>, ApiError> {
        let limit = DEFAULT_FETCH_COUNT.to_string();
        let offset = page_offset(page).to_string();
        let url = append_search_params(
            self.endpoint("search"),
            &[
                ("api_key", self.api_key.as_str()),
                ("q", keyword),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
                ("rating", DEFAULT_RATING),
                ("lang", DEFAULT_LANGUAGE),
            ],
        );

        self.fetch_gifs(url).await
    }

    /// Fetches a GIF list and maps it to display images, logging failures
    async fn fetch_gifs(&self, url: Url) -> Result<Vec<GifImage>, ApiError> {
        match self.client.fetch::<GifsResponse>(url).await {
            Ok(response) => Ok(convert_records(response.data)),
            Err(e) => {
                match &e {
                    ApiError::Status { status, message } => {
                        error!(status, message = %message, "API Error");
                    }
                    other => error!(error = %other, "Unexpected error"),
                }
                Err(e)
            }
        }
    }

    /// Builds `<base_url>/<name>`
    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }
}

/// Search offset for a zero-based page
pub fn page_offset(page: u32) -> u64 {
    u64::from(page) * u64::from(DEFAULT_FETCH_COUNT)
}
