//! I/O operations for segmented range streaming.
//!
//! Everything that touches the network or suspends lives here: the
//! [`RangeFetcher`] capability, the owning handle for an open segment, and
//! the stream that drives them.

mod blocking;
mod fetcher;
mod segment;
mod stream;

#[cfg(feature = "reqwest")]
mod http;

pub use blocking::BlockingRangeStream;
pub use fetcher::{BoxStream, RangeFetcher, SegmentBody};
pub use stream::SegmentedRangeStream;

#[cfg(feature = "reqwest")]
pub use http::{HttpFetchError, ReqwestFetcher};
