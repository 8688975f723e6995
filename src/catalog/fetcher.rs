//! HTTP fetcher implementation
//!
//! This module handles all outbound requests to the catalog site:
//! - Building the HTTP client from configuration
//! - GET requests for search and detail pages
//! - Error classification
//!
//! There is no retry logic. A failed fetch is final for that page and the
//! caller decides how to degrade.

use crate::config::HttpConfig;
use crate::ProviderError;
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Page body content
        body: String,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (DNS, connection refused, timeout, broken body, ...)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the request hit the configured timeout
        timed_out: bool,
    },
}

impl FetchResult {
    /// Returns the body of a successful fetch, or the failure as an error
    pub fn into_body(self, url: &str) -> Result<String, ProviderError> {
        match self {
            FetchResult::Success { body } => Ok(body),
            FetchResult::HttpError { status_code } => Err(ProviderError::HttpStatus {
                url: url.to_string(),
                status: status_code,
            }),
            FetchResult::NetworkError {
                timed_out: true, ..
            } => Err(ProviderError::Timeout {
                url: url.to_string(),
            }),
            FetchResult::NetworkError { error, .. } => Err(ProviderError::Network {
                url: url.to_string(),
                message: error,
            }),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Timeouts are only applied when configured.
///
/// # Example
///
/// ```no_run
/// use audioteka_provider::catalog::build_http_client;
/// use audioteka_provider::config::HttpConfig;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    if let Some(secs) = config.connect_timeout_secs {
        builder = builder.connect_timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches a page and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with readable body | Success |
/// | Any other status | HttpError |
/// | Timeout | NetworkError (timed_out) |
/// | DNS / connect / body error | NetworkError |
pub async fn fetch_page(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success { body },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                    timed_out: e.is_timeout(),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                    timed_out: true,
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: format!("Connection failed: {}", e),
                    timed_out: false,
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                    timed_out: false,
                }
            }
        }
    }
}
