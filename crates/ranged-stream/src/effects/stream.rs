use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::core::{RetryBudget, resolve_seek, retry_delay, segment_range};
use crate::data::{SeekOrigin, StreamDescriptor, StreamOptions};
use crate::effects::fetcher::RangeFetcher;
use crate::effects::segment::ActiveSegment;
use crate::error::{BoxError, Result, StreamError};

/// Seekable byte stream over a remote resource fetched in bounded ranges.
///
/// At most one segment is open at a time. It is opened lazily by
/// [`read`](Self::read) at the current position, consumed in order, and
/// released on seek, on failure, on [`close`](Self::close), or on drop.
/// Transient failures are retried from the exact byte offset where they
/// occurred.
///
/// The stream serves one caller: `read` and `seek` take `&mut self`, so
/// concurrent calls on the same instance must be serialized by the caller.
///
/// # Examples
///
/// ```no_run
/// use ranged_stream::{ReqwestFetcher, SegmentedRangeStream, SeekOrigin, StreamOptions};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let url = "https://example.com/video.mp4";
/// let fetcher = ReqwestFetcher::new();
/// let length = fetcher.content_length(url).await?.unwrap_or(0);
///
/// let mut stream = SegmentedRangeStream::new(
///     fetcher,
///     url,
///     length,
///     StreamOptions::default().segment_size(512 * 1024),
/// )?;
///
/// stream.seek(-1024, SeekOrigin::End)?;
/// let mut tail = [0u8; 1024];
/// let n = stream.read(&mut tail).await?;
/// # Ok(())
/// # }
/// ```
pub struct SegmentedRangeStream<F: RangeFetcher> {
    fetcher:    F,
    descriptor: StreamDescriptor,
    position:   u64,
    active:     Option<ActiveSegment<F::Error>>,
}

impl<F: RangeFetcher> SegmentedRangeStream<F> {
    /// Create a stream over `url` with a known total `length`.
    ///
    /// No request is issued until the first read.
    pub fn new(
        fetcher: F,
        url: impl Into<String>,
        length: u64,
        options: StreamOptions,
    ) -> Result<Self> {
        let descriptor = StreamDescriptor::new(url, length, &options)?;
        Ok(Self::from_descriptor(fetcher, descriptor))
    }

    pub fn from_descriptor(fetcher: F, descriptor: StreamDescriptor) -> Self {
        Self {
            fetcher,
            descriptor,
            position: 0,
            active: None,
        }
    }

    /// Current absolute read position.
    pub fn position(&self) -> u64 { self.position }

    /// Total logical length of the resource.
    pub fn len(&self) -> u64 { self.descriptor.length() }

    pub fn is_empty(&self) -> bool { self.descriptor.length() == 0 }

    pub fn descriptor(&self) -> &StreamDescriptor { &self.descriptor }

    /// Move the read position.
    ///
    /// Positions past the end are accepted; reads there return 0. A seek that
    /// resolves to the current position keeps the open segment.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidPosition`] if the target is negative. Nothing is
    /// changed in that case.
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<u64> {
        let target = resolve_seek(self.position, self.len(), offset, origin)?;
        if target != self.position {
            self.release_segment();
            trace!(from = self.position, to = target, "seek");
            self.position = target;
        }
        Ok(target)
    }

    /// Read up to `buf.len()` bytes at the current position.
    ///
    /// Returns 0 only at or past the end of the stream (or for an empty
    /// `buf`), without touching the network. Each call has its own retry
    /// budget of `retry_limit` failed cycles; a failed cycle is an open
    /// error, a mid-read error, or a freshly opened segment that ends before
    /// yielding a byte. A segment that ends after yielding bytes is re-opened
    /// at the same position without being charged.
    ///
    /// Cancel safe: dropping the future leaves the position unchanged and
    /// loses no bytes.
    ///
    /// # Errors
    ///
    /// [`StreamError::SegmentFetchExhausted`] once the budget is spent. The
    /// position is unchanged and no segment is held, so the call can be
    /// repeated.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let length = self.len();
        if self.position >= length || buf.is_empty() {
            return Ok(0);
        }

        let want = usize::try_from(length - self.position).map_or(buf.len(), |r| r.min(buf.len()));
        let buf = &mut buf[..want];
        let mut budget = RetryBudget::new(self.descriptor.retry_limit());

        loop {
            if self.active.is_none() {
                match open_segment(&self.fetcher, &self.descriptor, self.position).await {
                    Ok(segment) => self.active = Some(segment),
                    Err(e) => {
                        self.retry_or_fail(&mut budget, Some(e)).await?;
                        continue;
                    }
                }
            }

            let Some(segment) = self.active.as_mut() else {
                continue;
            };

            match segment.read(buf).await {
                Ok(0) if segment.has_progress() => {
                    trace!(position = self.position, "segment ended early, reopening");
                    self.release_segment();
                }
                Ok(0) => self.retry_or_fail(&mut budget, None).await?,
                Ok(n) => {
                    let drained = segment.is_drained();
                    self.position += n as u64;
                    if drained {
                        self.release_segment();
                    }
                    return Ok(n);
                }
                Err(e) => self.retry_or_fail(&mut budget, Some(e)).await?,
            }
        }
    }

    /// [`read`](Self::read) that gives up when `cancel` fires.
    ///
    /// Cancellation is observed while waiting on the fetcher or the segment
    /// body. On cancellation the open segment is released, the position is
    /// unchanged, and [`StreamError::Cancelled`] is returned. End of stream
    /// never suspends, so it returns 0 even with a cancelled token.
    pub async fn read_cancellable(
        &mut self,
        buf: &mut [u8],
        cancel: &CancellationToken,
    ) -> Result<usize> {
        if self.position >= self.len() || buf.is_empty() {
            return Ok(0);
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.read(buf) => Some(result),
        };

        match result {
            Some(result) => result,
            None => {
                self.release_segment();
                debug!(position = self.position, "read cancelled");
                Err(StreamError::Cancelled)
            }
        }
    }

    /// Release the open segment, if any. Safe to call repeatedly; the stream
    /// stays usable and re-opens on the next read.
    pub fn close(&mut self) { self.release_segment(); }

    /// Charge a failed cycle. Errors once the budget is spent, otherwise
    /// waits out the backoff so the caller can re-open.
    async fn retry_or_fail(
        &mut self,
        budget: &mut RetryBudget,
        cause: Option<F::Error>,
    ) -> Result<()> {
        self.release_segment();

        if !budget.charge() {
            debug!(
                position = self.position,
                attempts = budget.spent(),
                "segment retry budget exhausted"
            );
            return Err(StreamError::SegmentFetchExhausted {
                position: self.position,
                attempts: budget.spent(),
                source:   cause.map(|e| Box::new(e) as BoxError),
            });
        }

        match &cause {
            Some(e) => debug!(position = self.position, retry = budget.spent(), error = %e, "segment failed, retrying"),
            None => debug!(position = self.position, retry = budget.spent(), "segment yielded no data, retrying"),
        }

        let delay = retry_delay(budget.spent() - 1, self.descriptor.retry_backoff());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    fn release_segment(&mut self) { self.active = None; }
}

/// Open the segment serving reads at `position`.
///
/// Borrows only the fetcher and descriptor; the `read` future must stay
/// `Send` even though the stream is not `Sync`.
async fn open_segment<F: RangeFetcher>(
    fetcher: &F,
    descriptor: &StreamDescriptor,
    position: u64,
) -> std::result::Result<ActiveSegment<F::Error>, F::Error> {
    let range = segment_range(position, descriptor.segment_size());
    debug!(url = descriptor.url(), %range, "opening segment");
    let body = fetcher.open_range(descriptor.url(), range).await?;
    Ok(ActiveSegment::new(range, body))
}

impl<F: RangeFetcher> std::fmt::Debug for SegmentedRangeStream<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentedRangeStream")
            .field("descriptor", &self.descriptor)
            .field("position", &self.position)
            .field("segment_open", &self.active.is_some())
            .finish()
    }
}
