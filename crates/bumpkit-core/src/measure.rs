//! Trial formatting pass and bounded slice writer.
//!
//! [`measure`] runs the formatter against a [`LengthCounter`] that discards
//! output, yielding the exact byte length the real pass will produce.
//! [`format_into`] then renders into a caller-sized slice through a
//! [`SliceWriter`], which refuses to write past the end of its slice.

use std::fmt::{self, Write};

/// A [`fmt::Write`] sink that only counts bytes.
///
/// Used for the trial pass: nothing is written anywhere, so a formatter
/// error here leaves every buffer untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct LengthCounter {
    len: usize,
}

impl LengthCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes counted so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no bytes have been counted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Write for LengthCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.len = self.len.checked_add(s.len()).ok_or(fmt::Error)?;
        Ok(())
    }
}

/// Measure the formatted length of `args` in bytes without producing output.
///
/// Returns `Err(fmt::Error)` if any `Display`/`Debug` impl involved reports
/// an error, or if the length would overflow `usize`.
pub fn measure(args: fmt::Arguments<'_>) -> Result<usize, fmt::Error> {
    let mut counter = LengthCounter::new();
    counter.write_fmt(args)?;
    Ok(counter.len())
}

/// A [`fmt::Write`] sink over a fixed byte slice.
///
/// A write that does not fit in the remaining space fails as a whole; no
/// part of the rejected fragment is copied.
#[derive(Debug)]
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    written: usize,
}

impl<'a> SliceWriter<'a> {
    /// Wrap `buf`, starting at its first byte.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, written: 0 }
    }

    /// Bytes written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Space left in the slice.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.written
    }
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if bytes.len() > self.remaining() {
            return Err(fmt::Error);
        }
        let end = self.written + bytes.len();
        self.buf[self.written..end].copy_from_slice(bytes);
        self.written = end;
        Ok(())
    }
}

/// Format `args` into the front of `buf`, returning the number of bytes written.
///
/// Fails if the formatter reports an error or the output does not fit.
/// On failure a prefix of `buf` may already hold output; callers size `buf`
/// with [`measure`] first and discard the region on error.
pub fn format_into(buf: &mut [u8], args: fmt::Arguments<'_>) -> Result<usize, fmt::Error> {
    let mut writer = SliceWriter::new(buf);
    writer.write_fmt(args)?;
    Ok(writer.written())
}
