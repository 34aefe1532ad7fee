//! Immutable data types for segmented range streaming.
//!
//! This module contains the configuration and descriptor types that are
//! fixed once a stream is constructed, plus the small value types used to
//! describe byte ranges and seek origins.

pub mod options;
pub mod range;

pub use options::{StreamDescriptor, StreamOptions};
pub use range::{ByteRange, SeekOrigin};
