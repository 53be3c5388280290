//! The string buffer.

use std::fmt;

use bumpkit_core::{format_into, measure};

use crate::error::BufferError;

/// An owned, growable UTF-8 buffer.
///
/// `capacity` is the size of the zero-filled backing vector; `len` is the
/// number of meaningful bytes. At least one byte past the text is always
/// kept free and zero, so the content is terminated in place.
///
/// # Threading
///
/// Not synchronised. Shared mutation across threads needs an external lock.
#[derive(Clone, Debug)]
pub struct StringBuffer {
    /// Backing storage. `buffer.len()` is the buffer's capacity; bytes from
    /// `length` onward are zero.
    buffer: Vec<u8>,
    length: usize,
}

impl StringBuffer {
    /// Capacity used by [`StringBuffer::new`].
    pub const DEFAULT_CAPACITY: usize = 32;

    /// Create an empty buffer with [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY).
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create an empty buffer with `capacity` zeroed bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity],
            length: 0,
        }
    }

    /// Create a buffer holding `source`, with room for roughly as much again.
    pub fn from_text(source: &str) -> Self {
        let len = source.len();
        let mut sb = Self::with_capacity(len.saturating_mul(2).max(len + 1));
        sb.buffer[..len].copy_from_slice(source.as_bytes());
        sb.length = len;
        sb
    }

    /// Release the backing storage. Capacity and length become zero.
    ///
    /// A released buffer stays usable: the next write grows it from zero.
    pub fn deinit(&mut self) {
        self.buffer = Vec::new();
        self.length = 0;
    }

    /// Append `text` verbatim. Returns the number of bytes written.
    ///
    /// Braces and other format syntax in `text` are not interpreted.
    pub fn write(&mut self, text: &str) -> Result<usize, BufferError> {
        self.write_formatted(format_args!("{text}"))
    }

    /// Append formatted text. Returns the number of bytes written.
    ///
    /// The output is measured first. If it does not fit (with one spare
    /// byte), the buffer grows by at least twice the output length. On a
    /// formatter error nothing is appended.
    pub fn write_formatted(&mut self, args: fmt::Arguments<'_>) -> Result<usize, BufferError> {
        let len = measure(args)?;
        let needed = self
            .length
            .checked_add(len)
            .and_then(|n| n.checked_add(1))
            .ok_or(BufferError::AllocationFailed { requested: len })?;
        if needed > self.capacity() {
            let shortfall = needed - self.capacity();
            self.grow(len.saturating_mul(2).max(shortfall))?;
        }

        let start = self.length;
        let end = start + len;
        // A Display impl may render differently on the second pass.
        match format_into(&mut self.buffer[start..end], args) {
            Ok(written) if written == len => {}
            _ => {
                self.buffer[start..end].fill(0);
                return Err(BufferError::Format);
            }
        }
        self.length = end;
        Ok(len)
    }

    /// Same as [`write_formatted`](Self::write_formatted); lets `write!`
    /// target the buffer directly.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<usize, BufferError> {
        self.write_formatted(args)
    }

    /// Zero the whole buffer and set the length to zero. Capacity is kept.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
        self.length = 0;
    }

    /// Grow capacity by exactly `additional` zeroed bytes.
    ///
    /// Any amount is accepted; zero is a no-op. On allocation failure the
    /// buffer is left exactly as it was.
    pub fn grow(&mut self, additional: usize) -> Result<(), BufferError> {
        if additional == 0 {
            return Ok(());
        }
        let failed = BufferError::AllocationFailed {
            requested: additional,
        };
        let new_capacity = self.capacity().checked_add(additional).ok_or(failed.clone())?;
        self.buffer
            .try_reserve_exact(additional)
            .map_err(|_| failed)?;
        self.buffer.resize(new_capacity, 0);
        Ok(())
    }

    /// An independent copy of the text.
    pub fn to_owned_string(&self) -> String {
        self.as_str().to_owned()
    }

    /// The text written so far.
    pub fn as_str(&self) -> &str {
        // Only whole `&str`s and formatter output are ever copied in.
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    /// The text written so far, as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.length]
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Size of the backing storage in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Unused bytes after the text (including the reserved terminator byte).
    pub fn remaining(&self) -> usize {
        self.capacity() - self.length
    }
}

impl Default for StringBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for StringBuffer {
    fn from(source: &str) -> Self {
        Self::from_text(source)
    }
}

impl fmt::Write for StringBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s).map(|_| ()).map_err(|_| fmt::Error)
    }
}

impl fmt::Display for StringBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
