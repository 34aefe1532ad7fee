use bytes::{Buf, Bytes};
use futures_util::StreamExt;

use crate::data::ByteRange;
use crate::effects::fetcher::SegmentBody;

/// Owning handle for the currently open segment body.
///
/// Dropping the handle drops the body and with it the connection.
pub(crate) struct ActiveSegment<E> {
    range:     ByteRange,
    body:      SegmentBody<E>,
    pending:   Bytes,
    delivered: u64,
}

impl<E> ActiveSegment<E> {
    pub(crate) fn new(range: ByteRange, body: SegmentBody<E>) -> Self {
        Self {
            range,
            body,
            pending: Bytes::new(),
            delivered: 0,
        }
    }

    /// Bytes of the requested range not yet handed out.
    pub(crate) fn remaining(&self) -> u64 { self.range.len() - self.delivered }

    /// The whole requested range has been handed out.
    pub(crate) fn is_drained(&self) -> bool { self.remaining() == 0 }

    /// At least one byte was handed out since the segment was opened.
    pub(crate) fn has_progress(&self) -> bool { self.delivered > 0 }

    /// Copy the next bytes of the segment into `buf`.
    ///
    /// Returns `Ok(0)` once the body ends. Never hands out more than the
    /// requested range, so a server that ignores the range end cannot
    /// over-deliver. Cancel safe: dropping the future loses no bytes.
    pub(crate) async fn read(&mut self, buf: &mut [u8]) -> Result<usize, E> {
        let cap = usize::try_from(self.remaining()).map_or(buf.len(), |r| r.min(buf.len()));
        if cap == 0 {
            return Ok(0);
        }

        while self.pending.is_empty() {
            match self.body.next().await {
                Some(Ok(chunk)) => self.pending = chunk,
                Some(Err(e)) => return Err(e),
                None => return Ok(0),
            }
        }

        let n = cap.min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.advance(n);
        self.delivered += n as u64;
        Ok(n)
    }
}

impl<E> Drop for ActiveSegment<E> {
    fn drop(&mut self) {
        tracing::trace!(range = %self.range, delivered = self.delivered, "released segment");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use std::io;

    fn segment(range: ByteRange, chunks: Vec<io::Result<Bytes>>) -> ActiveSegment<io::Error> {
        ActiveSegment::new(range, Box::pin(stream::iter(chunks)))
    }

    #[tokio::test]
    async fn test_read_splits_large_chunk() {
        let range = ByteRange::new(0, 9).unwrap();
        let mut seg = segment(range, vec![Ok(Bytes::from_static(b"0123456789"))]);

        let mut buf = [0u8; 4];
        assert_eq!(seg.read(&mut buf).await.unwrap(), 4);
        assert_eq!(&buf, b"0123");
        assert!(seg.has_progress());

        assert_eq!(seg.read(&mut buf).await.unwrap(), 4);
        assert_eq!(&buf, b"4567");

        assert_eq!(seg.read(&mut buf).await.unwrap(), 2);
        assert_eq!(&buf[..2], b"89");
        assert!(seg.is_drained());
    }

    #[tokio::test]
    async fn test_read_skips_empty_chunks() {
        let range = ByteRange::new(0, 2).unwrap();
        let mut seg = segment(
            range,
            vec![Ok(Bytes::new()), Ok(Bytes::new()), Ok(Bytes::from_static(b"abc"))],
        );

        let mut buf = [0u8; 8];
        assert_eq!(seg.read(&mut buf).await.unwrap(), 3);
        assert_eq!(&buf[..3], b"abc");
    }

    #[tokio::test]
    async fn test_read_caps_at_range_span() {
        let range = ByteRange::new(100, 103).unwrap();
        let mut seg = segment(range, vec![Ok(Bytes::from_static(b"abcdefgh"))]);

        let mut buf = [0u8; 8];
        assert_eq!(seg.read(&mut buf).await.unwrap(), 4);
        assert_eq!(&buf[..4], b"abcd");
        assert_eq!(seg.read(&mut buf).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_read_reports_end_and_error() {
        let range = ByteRange::new(0, 99).unwrap();
        let mut ended = segment(range, vec![]);
        let mut buf = [0u8; 8];
        assert_eq!(ended.read(&mut buf).await.unwrap(), 0);
        assert!(!ended.has_progress());

        let mut broken = segment(
            range,
            vec![
                Ok(Bytes::from_static(b"ab")),
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
            ],
        );
        assert_eq!(broken.read(&mut buf).await.unwrap(), 2);
        let err = broken.read(&mut buf).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
    }
}
