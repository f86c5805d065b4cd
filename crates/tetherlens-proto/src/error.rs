//! Query construction and result errors.

use thiserror::Error;

/// Errors raised while building queries or interpreting results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Result count outside the accepted set.
    #[error("invalid limit {0}: expected one of 10, 20, 50")]
    InvalidLimit(u32),

    /// Time window whose start lies after its end.
    #[error("invalid time window: start {start} is after end {end}")]
    InvalidTimeWindow { start: i64, end: i64 },

    /// Entity token not in the known set.
    #[error("unknown entity type: {0}")]
    UnknownEntity(String),

    /// Ordering direction other than asc/desc.
    #[error("unknown order direction: {0}")]
    UnknownDirection(String),

    /// Result payload did not have the expected shape.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
