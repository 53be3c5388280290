//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The aligned request does not fit in the backing block.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Aligned offset the allocation would have started at, if it could
        /// be computed without overflow.
        offset: Option<usize>,
        /// Total capacity of the backing block.
        capacity: usize,
    },
    /// A handle passed to `realloc` does not lie within the arena's block.
    InvalidAllocation {
        /// Offset carried by the handle.
        offset: usize,
        /// Length carried by the handle.
        len: usize,
        /// Total capacity of the backing block.
        capacity: usize,
    },
    /// A `Display`/`Debug` impl reported an error while formatting.
    Format,
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                offset: Some(offset),
                capacity,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes at offset {offset}, capacity {capacity} bytes"
                )
            }
            Self::CapacityExceeded {
                requested,
                offset: None,
                capacity,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, capacity {capacity} bytes"
                )
            }
            Self::InvalidAllocation {
                offset,
                len,
                capacity,
            } => {
                write!(
                    f,
                    "allocation {offset}..{} is outside the arena (capacity {capacity} bytes)",
                    offset.saturating_add(*len)
                )
            }
            Self::Format => write!(f, "formatter reported an error"),
        }
    }
}

impl Error for ArenaError {}

impl From<fmt::Error> for ArenaError {
    fn from(_: fmt::Error) -> Self {
        Self::Format
    }
}
