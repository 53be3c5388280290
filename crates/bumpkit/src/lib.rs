//! bumpkit: a bump-pointer arena and a growable string buffer.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the bumpkit sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use bumpkit::prelude::*;
//!
//! let mut block = [0u8; 256];
//! let mut arena = Arena::new(&mut block);
//! let name = arena.strdup("widget").unwrap();
//! let label = arena.format(format_args!("{}#{}", "widget", 3)).unwrap();
//!
//! let mut sb = StringBuffer::new();
//! sb.write(arena.str(name).unwrap()).unwrap();
//! sb.write_formatted(format_args!(" -> {}", arena.str(label).unwrap())).unwrap();
//! assert_eq!(sb.to_owned_string(), "widget -> widget#3");
//!
//! arena.reset();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `bumpkit-arena` | `Arena`, `ArenaSlice`, `ArenaStr`, `ArenaError` |
//! | [`strbuf`] | `bumpkit-strbuf` | `StringBuffer`, `BufferError` |
//! | [`fmt`] | `bumpkit-core` | Trial formatting pass and slice writer |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Linear arena allocation (`bumpkit-arena`).
pub use bumpkit_arena as arena;

/// Growable string buffer (`bumpkit-strbuf`).
pub use bumpkit_strbuf as strbuf;

/// Two-pass formatting primitives (`bumpkit-core`).
pub use bumpkit_core as fmt;

pub use bumpkit_arena::arena_format;

/// Common imports for typical bumpkit usage.
///
/// ```rust
/// use bumpkit::prelude::*;
/// ```
pub mod prelude {
    pub use bumpkit_arena::{Arena, ArenaConfig, ArenaError, ArenaSlice, ArenaStr};
    pub use bumpkit_strbuf::{BufferError, StringBuffer};
}
