//! Logo fetcher.
//!
//! Downloads logo images over HTTP(S). Every call is bounded by a fixed
//! 30 second timeout covering connect, response and body. Nothing is cached:
//! each branding operation fetches its own copy of the logo.
//!
//! The [`LogoFetcher`] trait is the seam the branding pipeline depends on, so
//! tests and alternative transports can replace the HTTP client.

use super::error::FetchError;
use crate::constants::LOGO_FETCH_TIMEOUT_SECS;
use async_trait::async_trait;
use std::time::Duration;

/// Source of remote logo bytes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogoFetcher: Send + Sync {
    /// Download the raw bytes at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// [`LogoFetcher`] backed by a shared reqwest client.
#[derive(Clone)]
pub struct HttpLogoFetcher {
    http_client: reqwest::Client,
}

impl HttpLogoFetcher {
    /// Create a fetcher with the standard logo timeout.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the HTTP client cannot be created
    /// (e.g., TLS backend initialization failure).
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(LOGO_FETCH_TIMEOUT_SECS))
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport {
                url: String::new(),
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl LogoFetcher for HttpLogoFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| classify(url, e))?;

        tracing::debug!(bytes = bytes.len(), "Logo downloaded");
        Ok(bytes.to_vec())
    }
}

fn classify(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// Extract the file extension (without the dot) from a logo URL.
///
/// Only the path is considered; query string and fragment are ignored.
/// Returns an empty string when the last path segment has no extension.
pub fn extension_from_url(source: &str) -> String {
    let path = match reqwest::Url::parse(source) {
        Ok(url) => url.path().to_string(),
        Err(_) => source
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let file_name = path.rsplit('/').next().unwrap_or_default();
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_string(),
        None => String::new(),
    }
}
