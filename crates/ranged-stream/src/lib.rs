//! Seekable byte stream over a remote resource fetched in bounded range requests.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and descriptor types
//! - [`core`] - Pure range, seek and retry arithmetic
//! - [`effects`] - I/O behind the [`RangeFetcher`] trait
//!
//! # Key Features
//!
//! - **Lazy Segments**: A range request is issued only when a read needs it
//! - **Single Segment**: At most one open body, released on seek, failure or drop
//! - **Exact Resume**: Failed segments re-open at the byte where they failed
//! - **Mechanism-Only**: No logging to users; errors carry what callers need

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use data::{ByteRange, SeekOrigin, StreamDescriptor, StreamOptions};
pub use effects::{
    BlockingRangeStream, BoxStream, RangeFetcher, SegmentBody, SegmentedRangeStream,
};
pub use error::{BoxError, Result, StreamError};

#[cfg(feature = "reqwest")]
pub use effects::{HttpFetchError, ReqwestFetcher};

pub use tokio_util::sync::CancellationToken;
