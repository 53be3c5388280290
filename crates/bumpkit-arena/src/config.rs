//! Arena configuration parameters.

/// Configuration for the arena allocator.
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Alignment used by [`Arena::alloc`](crate::Arena::alloc),
    /// [`Arena::realloc`](crate::Arena::realloc) and the duplication helpers.
    ///
    /// Default: `2 * size_of::<usize>()` (16 bytes on 64-bit targets).
    /// Must be a non-zero power of two.
    pub default_alignment: usize,
}

impl ArenaConfig {
    /// Default alignment: two machine words.
    pub const DEFAULT_ALIGNMENT: usize = 2 * std::mem::size_of::<usize>();

    /// Create a config with the given default alignment.
    ///
    /// # Panics
    ///
    /// Panics if `default_alignment` is not a power of two.
    pub fn with_alignment(default_alignment: usize) -> Self {
        assert!(
            default_alignment.is_power_of_two(),
            "default_alignment must be a power of two, got {default_alignment}",
        );
        Self { default_alignment }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            default_alignment: Self::DEFAULT_ALIGNMENT,
        }
    }
}
