//! Formatting primitives for the bumpkit workspace.
//!
//! This is the leaf crate with zero internal dependencies. Both the arena
//! and the string buffer size their output with a trial pass before writing
//! anything, so formatted text is either committed whole or not at all:
//!
//! ```text
//! measure(args)  ──► len        (no bytes written)
//! reserve len + 1               (caller: arena alloc / buffer grow)
//! format_into(&mut buf[..len], args)
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod measure;

pub use measure::{format_into, measure, LengthCounter, SliceWriter};

/// The string terminator appended after formatted and duplicated text.
pub const NUL: u8 = 0;
