use crate::data::SeekOrigin;
use crate::error::{Result, StreamError};

/// Resolve a seek request to an absolute position.
///
/// `Begin` yields `offset`, `Current` yields `position + offset`, `End`
/// yields `length + offset`. Results past `length` are allowed; negative
/// results fail with [`StreamError::InvalidPosition`].
///
/// # Examples
///
/// ```
/// use ranged_stream::SeekOrigin;
/// use ranged_stream::core::resolve_seek;
///
/// assert_eq!(resolve_seek(10, 100, -5, SeekOrigin::End).unwrap(), 95);
/// assert!(resolve_seek(10, 100, -11, SeekOrigin::Current).is_err());
/// ```
pub fn resolve_seek(position: u64, length: u64, offset: i64, origin: SeekOrigin) -> Result<u64> {
    let base = match origin {
        SeekOrigin::Begin => 0,
        SeekOrigin::Current => position,
        SeekOrigin::End => length,
    };
    let target = i128::from(base) + i128::from(offset);
    u64::try_from(target).map_err(|_| StreamError::InvalidPosition { offset: target })
}
