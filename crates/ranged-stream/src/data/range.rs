use std::fmt;

/// An inclusive byte range, as sent in an HTTP `Range` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    /// First byte offset (inclusive)
    pub start: u64,
    /// Last byte offset (inclusive)
    pub end:   u64,
}

impl ByteRange {
    /// Create a new range. Returns `None` if `start > end`.
    pub fn new(start: u64, end: u64) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Number of bytes covered by the range.
    ///
    /// A range covering the whole `u64` space saturates at `u64::MAX`. A
    /// range built with `end < start` counts as a single byte.
    pub fn len(&self) -> u64 { self.end.saturating_sub(self.start).saturating_add(1) }

    /// Always false; an inclusive range covers at least one byte.
    pub fn is_empty(&self) -> bool { false }

    /// Render the value of an HTTP `Range` request header.
    pub fn to_header(&self) -> String { format!("bytes={}-{}", self.start, self.end) }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Reference point for [`SegmentedRangeStream::seek`](crate::SegmentedRangeStream::seek).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    /// Offset is absolute.
    Begin,
    /// Offset is relative to the current position.
    Current,
    /// Offset is relative to the total length.
    End,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_range_rejects_inverted_bounds() {
        assert!(ByteRange::new(10, 9).is_none());
        assert!(ByteRange::new(10, 10).is_some());
    }

    #[test]
    fn test_byte_range_len_is_inclusive() {
        let range = ByteRange::new(0, 255).unwrap();
        assert_eq!(range.len(), 256);

        let single = ByteRange::new(7, 7).unwrap();
        assert_eq!(single.len(), 1);

        let full = ByteRange::new(0, u64::MAX).unwrap();
        assert_eq!(full.len(), u64::MAX);
    }

    #[test]
    fn test_byte_range_len_with_inverted_literal() {
        let inverted = ByteRange { start: 10, end: 5 };
        assert_eq!(inverted.len(), 1);
    }

    #[test]
    fn test_byte_range_header() {
        let range = ByteRange::new(256, 511).unwrap();
        assert_eq!(range.to_header(), "bytes=256-511");
        assert_eq!(range.to_string(), "[256, 511]");
    }
}
