//! String buffer error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while writing to or growing a
/// [`StringBuffer`](crate::StringBuffer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// The allocator could not provide the additional capacity.
    /// The buffer keeps its previous size and contents.
    AllocationFailed {
        /// Additional bytes that were requested.
        requested: usize,
    },
    /// A `Display`/`Debug` impl reported an error while formatting.
    /// No bytes were committed.
    Format,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested } => {
                write!(f, "could not grow string buffer by {requested} bytes")
            }
            Self::Format => write!(f, "formatter reported an error"),
        }
    }
}

impl Error for BufferError {}

impl From<fmt::Error> for BufferError {
    fn from(_: fmt::Error) -> Self {
        Self::Format
    }
}
