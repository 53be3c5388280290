//! Linear (bump-pointer) arena allocation over a caller-supplied block.
//!
//! The arena borrows a `&mut [u8]` for its whole lifetime and never frees,
//! grows or replaces it. Allocations are offsets into that block, handed
//! out as [`ArenaSlice`] / [`ArenaStr`] handles and resolved through the
//! arena. This crate contains no `unsafe` code.
//!
//! # Architecture
//!
//! ```text
//! Arena<'mem>
//! ├── memory: &'mem mut [u8]     (borrowed, never owned)
//! ├── previous_offset            (start of most recent allocation)
//! ├── current_offset             (bump pointer)
//! └── ArenaConfig                (default alignment)
//! ```
//!
//! # Lifetime model
//!
//! There is no per-allocation release. Storage is reclaimed all at once by
//! [`Arena::reset`], [`Arena::zero_and_reset`] or [`Arena::deinit`]. The
//! one exception to strictly forward allocation is the most recent block,
//! which [`Arena::realloc`] can resize in place.
//!
//! # Example
//!
//! ```rust
//! use bumpkit_arena::{Arena, ArenaError};
//!
//! let mut block = [0u8; 64];
//! let mut arena = Arena::new(&mut block);
//!
//! let header = arena.memdup(b"HDR1").unwrap();
//! let body = arena.alloc(32).unwrap();
//! arena.bytes_mut(body)[0] = 0x7f;
//! assert_eq!(arena.bytes(header), b"HDR1");
//!
//! // Capacity exhaustion is reported, never truncated.
//! assert!(matches!(arena.alloc(64), Err(ArenaError::CapacityExceeded { .. })));
//!
//! arena.reset();
//! assert_eq!(arena.used(), 0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod align;
pub mod arena;
pub mod config;
mod dup;
pub mod error;
pub mod handle;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::{ArenaSlice, ArenaStr};

/// Format into an arena: `arena_format!(arena, "{}-{}", a, b)`.
///
/// Shorthand for [`Arena::format`] with [`format_args!`].
#[macro_export]
macro_rules! arena_format {
    ($arena:expr, $($arg:tt)*) => {
        $arena.format(::std::format_args!($($arg)*))
    };
}
