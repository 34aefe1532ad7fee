//! Pure transformations for segmented range streaming.
//!
//! Range arithmetic, seek resolution and retry accounting live here so the
//! effectful stream in [`crate::effects`] stays a thin loop around them.

mod position;
mod retry;
mod segment;

pub use position::resolve_seek;
pub use retry::{RetryBudget, retry_delay};
pub use segment::segment_range;
