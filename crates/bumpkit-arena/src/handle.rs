//! Allocation handles.
//!
//! An [`ArenaSlice`] records where an allocation lives inside the arena's
//! block. Handles are plain offsets: they carry no lifetime, so a handle kept
//! across [`Arena::reset`](crate::Arena::reset) still resolves to in-range
//! bytes that later allocations may overwrite.

use std::fmt;

/// Byte range of an allocation within the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct ArenaSlice {
    pub(crate) offset: usize,
    pub(crate) len: usize,
}

impl ArenaSlice {
    pub(crate) fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Offset of the first byte within the arena's block.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the allocation in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte, or `None` on overflow.
    pub fn checked_end(&self) -> Option<usize> {
        self.offset.checked_add(self.len)
    }
}

impl fmt::Display for ArenaSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArenaSlice(off={}, len={})", self.offset, self.len)
    }
}

/// A NUL-terminated string stored in the arena.
///
/// `len` counts the text only; the terminator sits at `offset + len`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct ArenaStr {
    pub(crate) offset: usize,
    pub(crate) len: usize,
}

impl ArenaStr {
    pub(crate) fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Length of the text in bytes, excluding the terminator.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the text is empty (only the terminator was stored).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The whole allocation, terminator included.
    ///
    /// Pass this to [`Arena::realloc`](crate::Arena::realloc) to grow the
    /// string's storage.
    pub fn as_slice(&self) -> ArenaSlice {
        ArenaSlice::new(self.offset, self.len + 1)
    }
}

impl From<ArenaStr> for ArenaSlice {
    fn from(s: ArenaStr) -> Self {
        s.as_slice()
    }
}
