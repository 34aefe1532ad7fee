use crate::data::ByteRange;

/// Range of the segment that serves reads starting at `position`.
///
/// The segment covers `[position, position + segment_size - 1]`. The end is
/// not clipped to the resource length; the server clips it.
///
/// # Examples
///
/// ```
/// use ranged_stream::core::segment_range;
///
/// let range = segment_range(256, 256);
/// assert_eq!((range.start, range.end), (256, 511));
/// ```
pub fn segment_range(position: u64, segment_size: u64) -> ByteRange {
    let span = segment_size.max(1) - 1;
    ByteRange {
        start: position,
        end:   position.saturating_add(span),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_range_aligned() {
        let starts: Vec<u64> = (0..4).map(|i| segment_range(i * 256, 256).start).collect();
        assert_eq!(starts, vec![0, 256, 512, 768]);
        assert_eq!(segment_range(768, 256).end, 1023);
    }

    #[test]
    fn test_segment_range_unaligned_position() {
        let range = segment_range(100, 256);
        assert_eq!(range.start, 100);
        assert_eq!(range.end, 355);
        assert_eq!(range.len(), 256);
    }

    #[test]
    fn test_segment_range_single_byte_segments() {
        let range = segment_range(42, 1);
        assert_eq!(range.start, 42);
        assert_eq!(range.end, 42);
    }

    #[test]
    fn test_segment_range_saturates() {
        let range = segment_range(u64::MAX - 10, 256);
        assert_eq!(range.end, u64::MAX);
    }
}
