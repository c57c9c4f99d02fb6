use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use crate::common::error::{redact_userinfo, AreteError};
use crate::common::result::AreteResult;

/// Fetch the text body of a URL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RawContentFetcher: Send + Sync {
    /// Issue a single GET and return the decoded body verbatim.
    ///
    /// A 404 is reported as [`AreteError::RemoteNotFound`]; any other non-2xx
    /// status or transport failure is [`AreteError::FetchFailed`].
    async fn fetch_text(&self, url: &str) -> AreteResult<String>;
}

/// reqwest-backed fetcher with a request timeout and no retries
#[derive(Debug, Clone)]
pub struct HttpRawContentClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpRawContentClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> AreteResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("arete/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AreteError::fetch_failed_with_source("Failed to create HTTP client", None, e)
            })?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl RawContentFetcher for HttpRawContentClient {
    async fn fetch_text(&self, url: &str) -> AreteResult<String> {
        let display_url = redact_userinfo(url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AreteError::timeout(format!("GET {}", display_url), self.timeout.as_secs())
            } else {
                AreteError::fetch_failed_with_source(
                    format!("GET {} failed", display_url),
                    Some(display_url.clone()),
                    e,
                )
            }
        })?;

        let status = response.status();
        debug!(url = %display_url, %status, "raw content response");

        if status == StatusCode::NOT_FOUND {
            return Err(AreteError::remote_not_found(display_url));
        }

        if !status.is_success() {
            return Err(AreteError::fetch_failed(
                format!("GET {} returned HTTP {}", display_url, status),
                Some(display_url),
            ));
        }

        response.text().await.map_err(|e| {
            AreteError::fetch_failed_with_source(
                format!("Failed to read response body from {}", display_url),
                Some(display_url.clone()),
                e,
            )
        })
    }
}
