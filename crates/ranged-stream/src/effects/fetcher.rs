use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

use crate::data::ByteRange;

/// A boxed stream type for segment bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Forward-only body of one open segment.
pub type SegmentBody<E> = BoxStream<'static, Result<Bytes, E>>;

/// Capability to open a byte-range read against a remote resource.
///
/// Implementations own the transport: connection reuse, TLS, headers,
/// status and redirect handling.
///
/// # Implementations
///
/// - [`ReqwestFetcher`](crate::ReqwestFetcher): HTTP `Range` requests via `reqwest`
/// - Scripted in-memory fetchers in tests
pub trait RangeFetcher: Send + Sync {
    /// Error for a failed open or an interrupted body.
    ///
    /// Every error of this type is treated as transient by the stream.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open a body whose first byte is at `range.start`.
    ///
    /// The body may end before `range.end` without error, e.g. when the
    /// range extends past the end of the resource.
    fn open_range(
        &self,
        url: &str,
        range: ByteRange,
    ) -> impl Future<Output = Result<SegmentBody<Self::Error>, Self::Error>> + Send;
}
