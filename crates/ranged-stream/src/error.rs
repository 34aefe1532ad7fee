//! Error types for ranged-stream.

use std::io;
use thiserror::Error;

/// Boxed transport error carried out of the retry loop.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("invalid seek: resolves to {offset} which is before the start of the stream")]
    InvalidPosition { offset: i128 },

    #[error("segment fetch exhausted at position {position} after {attempts} failed attempts")]
    SegmentFetchExhausted {
        position: u64,
        attempts: u32,
        #[source]
        source:   Option<BoxError>,
    },

    #[error("read cancelled")]
    Cancelled,

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        let kind = match e {
            StreamError::InvalidPosition { .. } | StreamError::InvalidConfig(_) => {
                io::ErrorKind::InvalidInput
            }
            // Not `Interrupted`: std readers silently retry on that kind.
            StreamError::Cancelled | StreamError::SegmentFetchExhausted { .. } => {
                io::ErrorKind::Other
            }
        };
        io::Error::new(kind, e)
    }
}

pub type Result<T> = std::result::Result<T, StreamError>;
