use std::io::{self, Read, Seek, SeekFrom};

use tokio::runtime::{Builder, Runtime};

use crate::data::SeekOrigin;
use crate::effects::fetcher::RangeFetcher;
use crate::effects::stream::SegmentedRangeStream;

/// Synchronous [`Read`] + [`Seek`] adapter over a [`SegmentedRangeStream`].
///
/// Owns a current-thread runtime and drives the async stream with
/// `block_on`. Must not be used from within an async context.
pub struct BlockingRangeStream<F: RangeFetcher> {
    inner:   SegmentedRangeStream<F>,
    runtime: Runtime,
}

impl<F: RangeFetcher> BlockingRangeStream<F> {
    pub fn new(inner: SegmentedRangeStream<F>) -> io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    pub fn get_ref(&self) -> &SegmentedRangeStream<F> { &self.inner }
}

impl<F: RangeFetcher> Read for BlockingRangeStream<F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.runtime.block_on(self.inner.read(buf))?)
    }
}

impl<F: RangeFetcher> Seek for BlockingRangeStream<F> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (offset, origin) = match pos {
            SeekFrom::Start(n) => {
                let n = i64::try_from(n).map_err(|_| {
                    io::Error::new(io::ErrorKind::InvalidInput, "seek offset exceeds i64::MAX")
                })?;
                (n, SeekOrigin::Begin)
            }
            SeekFrom::Current(n) => (n, SeekOrigin::Current),
            SeekFrom::End(n) => (n, SeekOrigin::End),
        };
        Ok(self.inner.seek(offset, origin)?)
    }

    fn stream_position(&mut self) -> io::Result<u64> { Ok(self.inner.position()) }
}
