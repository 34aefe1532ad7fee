use futures_util::StreamExt;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_LENGTH, RANGE};
use thiserror::Error;

use crate::data::ByteRange;
use crate::effects::fetcher::{RangeFetcher, SegmentBody};

#[derive(Debug, Error)]
pub enum HttpFetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server ignored range {range} (status {status})")]
    RangeIgnored { range: ByteRange, status: u16 },
}

/// Production range fetcher using `reqwest`.
///
/// Sends `GET` with a `Range: bytes=start-end` header plus any configured
/// headers. Error statuses fail the open; redirects follow the client's
/// policy.
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    client:  reqwest::Client,
    headers: Vec<(String, String)>,
}

impl ReqwestFetcher {
    /// Create a fetcher with a default `reqwest::Client`.
    pub fn new() -> Self { Self::default() }

    /// Create a fetcher around a preconfigured client (proxies, timeouts, TLS).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            headers: Vec::new(),
        }
    }

    /// Add a header sent with every range request.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Query `Content-Length` with a `HEAD` request.
    ///
    /// `Ok(None)` if the header is absent or unparsable.
    pub async fn content_length(&self, url: &str) -> Result<Option<u64>, HttpFetchError> {
        let mut request = self.client.head(url);
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        let response = request.send().await?.error_for_status()?;
        let length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());

        Ok(length)
    }
}

impl RangeFetcher for ReqwestFetcher {
    type Error = HttpFetchError;

    async fn open_range(
        &self,
        url: &str,
        range: ByteRange,
    ) -> Result<SegmentBody<Self::Error>, Self::Error> {
        let mut request = self.client.get(url).header(RANGE, range.to_header());
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        let response = request.send().await?.error_for_status()?;

        // A full-body 200 is only usable when the range starts at 0.
        if response.status() == StatusCode::OK && range.start > 0 {
            return Err(HttpFetchError::RangeIgnored {
                range,
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes_stream().map(|chunk| chunk.map_err(HttpFetchError::from));
        Ok(Box::pin(body))
    }
}
