use std::time::Duration;

use crate::error::{Result, StreamError};

/// Default span of a single range request: 1 MiB.
pub const DEFAULT_SEGMENT_SIZE: u64 = 1024 * 1024;

/// Tunables for a [`SegmentedRangeStream`](crate::SegmentedRangeStream).
///
/// # Examples
///
/// ```
/// use ranged_stream::StreamOptions;
/// use std::time::Duration;
///
/// let options = StreamOptions::default()
///     .segment_size(256 * 1024)
///     .retry_limit(5)
///     .retry_backoff(Duration::from_millis(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOptions {
    /// Maximum span of a single range request in bytes.
    ///
    /// Each request covers `[position, position + segment_size - 1]`; the
    /// server clips the last one to the resource length.
    ///
    /// Default: 1 MiB
    pub segment_size: u64,

    /// Maximum number of failed segment cycles tolerated within one `read`.
    ///
    /// - Counts open failures, mid-read errors, and freshly opened segments
    ///   that end without yielding a byte
    /// - Total attempts per `read` = 1 (initial) + retry_limit
    ///
    /// Default: 3
    pub retry_limit: u32,

    /// Base delay for exponential backoff between failed cycles.
    ///
    /// The delay before retry N is `retry_backoff * 2^(N-1)`. Zero re-opens
    /// immediately.
    ///
    /// Default: zero
    pub retry_backoff: Duration,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            segment_size:  DEFAULT_SEGMENT_SIZE,
            retry_limit:   3,
            retry_backoff: Duration::ZERO,
        }
    }
}

impl StreamOptions {
    /// Set the span of a single range request.
    #[must_use]
    pub fn segment_size(mut self, segment_size: u64) -> Self {
        self.segment_size = segment_size;
        self
    }

    /// Set the retry budget of a single `read`.
    #[must_use]
    pub fn retry_limit(mut self, retry_limit: u32) -> Self {
        self.retry_limit = retry_limit;
        self
    }

    /// Set the base backoff between failed cycles.
    #[must_use]
    pub fn retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }
}

/// Immutable description of a remote resource being streamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDescriptor {
    url:           String,
    length:        u64,
    segment_size:  u64,
    retry_limit:   u32,
    retry_backoff: Duration,
}

impl StreamDescriptor {
    /// Fix the stream parameters. Fails if `options.segment_size` is zero.
    pub fn new(url: impl Into<String>, length: u64, options: &StreamOptions) -> Result<Self> {
        if options.segment_size == 0 {
            return Err(StreamError::InvalidConfig("segment size must be greater than 0"));
        }
        Ok(Self {
            url: url.into(),
            length,
            segment_size: options.segment_size,
            retry_limit: options.retry_limit,
            retry_backoff: options.retry_backoff,
        })
    }

    pub fn url(&self) -> &str { &self.url }

    pub fn length(&self) -> u64 { self.length }

    pub fn segment_size(&self) -> u64 { self.segment_size }

    pub fn retry_limit(&self) -> u32 { self.retry_limit }

    pub fn retry_backoff(&self) -> Duration { self.retry_backoff }
}
