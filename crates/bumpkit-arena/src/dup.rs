//! Copying and formatting helpers layered on [`Arena::alloc`].
//!
//! Strings are stored NUL-terminated so they can be handed to code that
//! expects C strings via [`Arena::c_str`].

use std::ffi::CStr;
use std::fmt;

use bumpkit_core::{format_into, measure, NUL};

use crate::arena::Arena;
use crate::error::ArenaError;
use crate::handle::{ArenaSlice, ArenaStr};

impl Arena<'_> {
    /// Allocate `source.len()` bytes and copy `source` into them.
    pub fn memdup(&mut self, source: &[u8]) -> Result<ArenaSlice, ArenaError> {
        let slice = self.alloc(source.len())?;
        self.bytes_mut(slice).copy_from_slice(source);
        Ok(slice)
    }

    /// Copy `source` up to its first NUL (or its end) and terminate it.
    pub fn strdup(&mut self, source: impl AsRef<[u8]>) -> Result<ArenaStr, ArenaError> {
        self.strndup(source, usize::MAX)
    }

    /// Copy at most `max_size` bytes of `source`, stopping early at a NUL,
    /// and terminate the copy.
    ///
    /// The result always occupies `len + 1` bytes.
    pub fn strndup(
        &mut self,
        source: impl AsRef<[u8]>,
        max_size: usize,
    ) -> Result<ArenaStr, ArenaError> {
        let source = source.as_ref();
        let bounded = &source[..source.len().min(max_size)];
        let len = bounded
            .iter()
            .position(|&b| b == NUL)
            .unwrap_or(bounded.len());

        let slice = self.alloc(len + 1)?;
        let dst = self.bytes_mut(slice);
        dst[..len].copy_from_slice(&bounded[..len]);
        dst[len] = NUL;
        Ok(ArenaStr::new(slice.offset, len))
    }

    /// Format `args` into a freshly allocated, NUL-terminated string.
    ///
    /// The output length is measured first and exactly `len + 1` bytes are
    /// allocated. If formatting fails, nothing stays allocated.
    ///
    /// ```rust
    /// # use bumpkit_arena::Arena;
    /// let mut block = [0u8; 64];
    /// let mut arena = Arena::new(&mut block);
    /// let s = arena.format(format_args!("{}-{}", 7, "up")).unwrap();
    /// assert_eq!(arena.str(s), Some("7-up"));
    /// ```
    pub fn format(&mut self, args: fmt::Arguments<'_>) -> Result<ArenaStr, ArenaError> {
        let len = measure(args)?;
        let size = len.checked_add(1).ok_or(ArenaError::CapacityExceeded {
            requested: len,
            offset: None,
            capacity: self.capacity(),
        })?;

        let (current, previous) = (self.used(), self.previous_offset());
        let slice = self.alloc(size)?;
        let region = &mut self.memory_mut()[slice.offset..slice.offset + len];
        // A Display impl may render differently on the second pass.
        match format_into(region, args) {
            Ok(written) if written == len => {}
            _ => {
                self.rewind(current, previous);
                return Err(ArenaError::Format);
            }
        }
        self.bytes_mut(slice)[len] = NUL;
        Ok(ArenaStr::new(slice.offset, len))
    }

    /// The string's text as UTF-8, or `None` if it is not valid UTF-8 or the
    /// handle is out of range.
    pub fn str(&self, s: ArenaStr) -> Option<&str> {
        std::str::from_utf8(self.get(ArenaSlice::new(s.offset, s.len))?).ok()
    }

    /// The string including its terminator, or `None` if the handle is out
    /// of range or the bytes were overwritten since allocation.
    pub fn c_str(&self, s: ArenaStr) -> Option<&CStr> {
        CStr::from_bytes_with_nul(self.get(s.as_slice())?).ok()
    }

    /// The string's raw bytes, excluding the terminator.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not lie within the block.
    pub fn str_bytes(&self, s: ArenaStr) -> &[u8] {
        self.bytes(ArenaSlice::new(s.offset, s.len))
    }
}
