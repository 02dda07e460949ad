//! HTTP transport for JSON APIs
//!
//! A thin wrapper over `reqwest` that turns non-success responses into a typed
//! error carrying the status code and the server's message.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Query parameters whose values never reach the logs
const REDACTED_PARAMS: &[&str] = &["api_key"];

/// Errors that can occur when calling the API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    #[error("API Error: {status} - {message}")]
    Status { status: u16, message: String },

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of a `Status` error
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client for issuing GET requests that return JSON
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    http: Client,
}

impl ApiClient {
    /// Create a new ApiClient with default settings
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Create a new ApiClient with a custom HTTP client
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// Fetches `url` and decodes the body as `T`
    ///
    /// # Returns
    /// * `Ok(T)` - Decoded body of a 2xx response
    /// * `Err(ApiError::Status)` - Non-2xx response, with the server's message
    /// * `Err(ApiError::Request | ApiError::Decode)` - Network or JSON failure
    pub async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(url = %redacted(&url), "GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Appends query parameters to `url`, keeping any already present
pub fn append_search_params(mut url: Url, params: &[(&str, &str)]) -> Url {
    url.query_pairs_mut().extend_pairs(params.iter().copied());
    url
}

/// Renders `url` with secret query values masked
pub fn redacted(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if REDACTED_PARAMS.contains(&key.as_ref()) {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

/// Extracts a human-readable message from an error body
///
/// GIPHY reports errors either as `{"message": ...}` or inside
/// `{"meta": {"msg": ...}}`; anything else falls back to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .or_else(|| value.pointer("/meta/msg").and_then(|m| m.as_str()))
                .map(str::to_string)
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        })
}
