//! Growable string buffer with all-or-nothing formatted writes.
//!
//! [`StringBuffer`] owns a zero-filled `Vec<u8>` and appends text to it.
//! Formatted writes run a trial pass first (see `bumpkit_core::measure`),
//! grow if needed, then format in place. A formatter error therefore never
//! commits partial output.
//!
//! ```rust
//! use bumpkit_strbuf::StringBuffer;
//!
//! let mut sb = StringBuffer::with_capacity(8);
//! for i in 0..3 {
//!     sb.write_formatted(format_args!("[{i}]")).unwrap();
//! }
//! assert_eq!(sb.as_str(), "[0][1][2]");
//! assert!(sb.capacity() > sb.len());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod error;

pub use buffer::StringBuffer;
pub use error::BufferError;
