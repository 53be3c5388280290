//! The linear allocator.
//!
//! An [`Arena`] borrows a contiguous block and hands out aligned sub-ranges
//! of it by advancing a cursor. Nothing is freed individually; the cursor is
//! rewound in bulk by [`Arena::reset`].

use crate::align::align_forward;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::ArenaSlice;

/// Bump allocator over a caller-supplied `&mut [u8]`.
///
/// The arena never owns, frees or resizes its block. Allocations are
/// returned as [`ArenaSlice`] handles and resolved with [`Arena::bytes`] /
/// [`Arena::bytes_mut`].
///
/// # Invariant
///
/// `previous_offset <= current_offset <= capacity` after every successful
/// operation.
///
/// # Threading
///
/// Not synchronised. The exclusive borrow of the block keeps an arena on one
/// thread at a time; sharing one between threads needs an external lock.
#[derive(Debug, Default)]
pub struct Arena<'mem> {
    /// Backing block. Empty while the arena is unbound.
    memory: &'mem mut [u8],
    /// Bump pointer: next free byte.
    current_offset: usize,
    /// Start of the most recent allocation.
    previous_offset: usize,
    config: ArenaConfig,
}

impl<'mem> Arena<'mem> {
    /// Bind a new arena to `memory` with the default configuration.
    pub fn new(memory: &'mem mut [u8]) -> Self {
        Self::with_config(memory, ArenaConfig::default())
    }

    /// Bind a new arena to `memory` with an explicit configuration.
    pub fn with_config(memory: &'mem mut [u8], config: ArenaConfig) -> Self {
        Self {
            memory,
            current_offset: 0,
            previous_offset: 0,
            config,
        }
    }

    /// Rebind this arena to `memory`, resetting both offsets.
    ///
    /// Any previously bound block is released back to its owner untouched;
    /// use [`Arena::deinit`] first to scrub it.
    pub fn init(&mut self, memory: &'mem mut [u8]) {
        self.memory = memory;
        self.current_offset = 0;
        self.previous_offset = 0;
    }

    /// Zero the used region, forget the block and return it to the caller.
    ///
    /// Afterwards the arena has zero capacity and every allocation fails
    /// until [`Arena::init`] binds a new block.
    pub fn deinit(&mut self) -> &'mem mut [u8] {
        self.memory[..self.current_offset].fill(0);
        self.current_offset = 0;
        self.previous_offset = 0;
        std::mem::take(&mut self.memory)
    }

    /// Allocate `size` zeroed bytes at the configured default alignment.
    pub fn alloc(&mut self, size: usize) -> Result<ArenaSlice, ArenaError> {
        self.alloc_aligned(size, self.config.default_alignment)
    }

    /// Allocate `size` zeroed bytes whose address is a multiple of `alignment`.
    ///
    /// Fails with [`ArenaError::CapacityExceeded`] if the aligned range does
    /// not fit; the arena is left unchanged in that case.
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is not a power of two.
    pub fn alloc_aligned(
        &mut self,
        size: usize,
        alignment: usize,
    ) -> Result<ArenaSlice, ArenaError> {
        let offset = self.next_aligned_offset(alignment);
        let end = offset
            .and_then(|start| start.checked_add(size))
            .filter(|&end| end <= self.capacity());
        let (Some(offset), Some(end)) = (offset, end) else {
            return Err(ArenaError::CapacityExceeded {
                requested: size,
                offset,
                capacity: self.capacity(),
            });
        };
        self.memory[offset..end].fill(0);
        self.previous_offset = offset;
        self.current_offset = end;
        Ok(ArenaSlice::new(offset, size))
    }

    /// Resize `old` to `new_size` bytes at the configured default alignment.
    ///
    /// See [`Arena::realloc_aligned`].
    pub fn realloc(
        &mut self,
        old: Option<ArenaSlice>,
        new_size: usize,
    ) -> Result<ArenaSlice, ArenaError> {
        self.realloc_aligned(old, new_size, self.config.default_alignment)
    }

    /// Resize an allocation.
    ///
    /// - `None` or an empty `old` behaves as [`Arena::alloc_aligned`].
    /// - If `old` is the most recent allocation it is resized in place: the
    ///   same offset comes back and any newly exposed bytes are zeroed.
    /// - Otherwise a fresh block is allocated and `min(old.len, new_size)`
    ///   bytes are moved into it.
    ///
    /// Fails with [`ArenaError::InvalidAllocation`] if `old` does not lie
    /// within this arena's block, or [`ArenaError::CapacityExceeded`] if the
    /// new size does not fit. The arena is unchanged on failure.
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is not a power of two.
    pub fn realloc_aligned(
        &mut self,
        old: Option<ArenaSlice>,
        new_size: usize,
        alignment: usize,
    ) -> Result<ArenaSlice, ArenaError> {
        assert!(
            alignment.is_power_of_two(),
            "alignment must be a power of two, got {alignment}",
        );
        let old = match old {
            Some(old) if !old.is_empty() => old,
            _ => return self.alloc_aligned(new_size, alignment),
        };

        let capacity = self.capacity();
        let within = old
            .checked_end()
            .is_some_and(|end| old.offset < capacity && end <= capacity);
        if !within {
            return Err(ArenaError::InvalidAllocation {
                offset: old.offset,
                len: old.len,
                capacity,
            });
        }

        if old.offset == self.previous_offset {
            return self.resize_in_place(old, new_size);
        }

        let fresh = self.alloc_aligned(new_size, alignment)?;
        let copy_len = old.len.min(new_size);
        self.memory
            .copy_within(old.offset..old.offset + copy_len, fresh.offset);
        Ok(fresh)
    }

    /// Grow or shrink the most recent allocation without moving it.
    ///
    /// Bounds-checked against capacity exactly like a fresh allocation.
    fn resize_in_place(
        &mut self,
        old: ArenaSlice,
        new_size: usize,
    ) -> Result<ArenaSlice, ArenaError> {
        let capacity = self.capacity();
        let end = old
            .offset
            .checked_add(new_size)
            .filter(|&end| end <= capacity)
            .ok_or(ArenaError::CapacityExceeded {
                requested: new_size,
                offset: Some(old.offset),
                capacity,
            })?;
        if new_size > old.len {
            self.memory[old.offset + old.len..end].fill(0);
        }
        self.current_offset = end;
        Ok(ArenaSlice::new(old.offset, new_size))
    }

    /// Offset at which an allocation with `alignment` would start, measured
    /// against the block's real address so returned memory is truly aligned.
    fn next_aligned_offset(&self, alignment: usize) -> Option<usize> {
        let base = self.base_address();
        let cursor = base.checked_add(self.current_offset)?;
        let aligned = align_forward(cursor, alignment)?;
        Some(aligned - base)
    }

    /// Rewind both offsets to zero. The block's contents are left as-is.
    ///
    /// Every outstanding handle stays in range but may be overwritten by
    /// later allocations.
    pub fn reset(&mut self) {
        self.current_offset = 0;
        self.previous_offset = 0;
    }

    /// Zero the used region, then [`reset`](Arena::reset).
    pub fn zero_and_reset(&mut self) {
        self.memory[..self.current_offset].fill(0);
        self.reset();
    }

    /// Shared view of an allocation.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not lie within the block.
    pub fn bytes(&self, slice: ArenaSlice) -> &[u8] {
        &self.memory[slice.offset..slice.offset + slice.len]
    }

    /// Mutable view of an allocation.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not lie within the block.
    pub fn bytes_mut(&mut self, slice: ArenaSlice) -> &mut [u8] {
        &mut self.memory[slice.offset..slice.offset + slice.len]
    }

    /// Shared view of an allocation, or `None` if it is out of range.
    pub fn get(&self, slice: ArenaSlice) -> Option<&[u8]> {
        self.memory.get(slice.offset..slice.checked_end()?)
    }

    /// Mutable view of an allocation, or `None` if it is out of range.
    pub fn get_mut(&mut self, slice: ArenaSlice) -> Option<&mut [u8]> {
        self.memory.get_mut(slice.offset..slice.checked_end()?)
    }

    /// Absolute address of an allocation's first byte.
    pub fn address(&self, slice: ArenaSlice) -> usize {
        self.base_address().wrapping_add(slice.offset)
    }

    fn base_address(&self) -> usize {
        self.memory.as_ptr() as usize
    }

    /// Total size of the bound block in bytes.
    pub fn capacity(&self) -> usize {
        self.memory.len()
    }

    /// Bytes consumed so far, alignment padding included.
    pub fn used(&self) -> usize {
        self.current_offset
    }

    /// Bytes left after the cursor, before any alignment padding.
    pub fn remaining(&self) -> usize {
        self.capacity() - self.current_offset
    }

    /// Start of the most recent allocation.
    pub fn previous_offset(&self) -> usize {
        self.previous_offset
    }

    /// Whether a non-empty block is bound.
    pub fn is_bound(&self) -> bool {
        !self.memory.is_empty()
    }

    /// The configuration this arena was created with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub(crate) fn memory_mut(&mut self) -> &mut [u8] {
        &mut *self.memory
    }

    /// Restore both offsets to a value captured before a failed operation.
    pub(crate) fn rewind(&mut self, current_offset: usize, previous_offset: usize) {
        self.current_offset = current_offset;
        self.previous_offset = previous_offset;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A block with a known base alignment, so offsets are predictable.
    #[repr(C, align(64))]
    pub(crate) struct Block<const N: usize>(pub(crate) [u8; N]);

    impl<const N: usize> Block<N> {
        pub(crate) fn filled(byte: u8) -> Self {
            Self([byte; N])
        }
    }

    #[test]
    fn alloc_returns_zeroed_memory() {
        let mut block = Block::<64>::filled(0xFF);
        let mut arena = Arena::new(&mut block.0);
        let a = arena.alloc_aligned(10, 8).unwrap();
        assert_eq!(a.offset(), 0);
        assert!(arena.bytes(a).iter().all(|&b| b == 0));
    }

    #[test]
    fn second_alloc_rounds_up_to_alignment() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        let a = arena.alloc_aligned(10, 8).unwrap();
        let b = arena.alloc_aligned(10, 8).unwrap();
        assert_eq!(a.offset(), 0);
        assert_eq!(b.offset(), 16);
        assert_eq!(arena.used(), 26);
        assert_eq!(arena.previous_offset(), 16);
    }

    #[test]
    fn exhaustion_fails_explicitly() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        for expected in [0, 16, 32, 48] {
            assert_eq!(arena.alloc_aligned(10, 8).unwrap().offset(), expected);
        }
        let err = arena.alloc_aligned(10, 8).unwrap_err();
        assert_eq!(
            err,
            ArenaError::CapacityExceeded {
                requested: 10,
                offset: Some(64),
                capacity: 64,
            }
        );
        // Failure leaves the cursor untouched.
        assert_eq!(arena.used(), 58);
        assert_eq!(arena.previous_offset(), 48);
    }

    #[test]
    fn exact_fit_succeeds() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        let a = arena.alloc_aligned(64, 1).unwrap();
        assert_eq!(a.len(), 64);
        assert_eq!(arena.remaining(), 0);
        assert!(arena.alloc_aligned(1, 1).is_err());
    }

    #[test]
    fn huge_request_does_not_overflow() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        arena.alloc_aligned(1, 1).unwrap();
        let err = arena.alloc_aligned(usize::MAX, 1).unwrap_err();
        assert!(matches!(err, ArenaError::CapacityExceeded { .. }));
        assert_eq!(arena.used(), 1);
    }

    #[test]
    fn default_alignment_from_config() {
        let mut block = Block::<128>::filled(0);
        let mut arena = Arena::with_config(&mut block.0, ArenaConfig::with_alignment(32));
        arena.alloc(1).unwrap();
        assert_eq!(arena.alloc(1).unwrap().offset(), 32);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn non_power_of_two_alignment_panics() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        let _ = arena.alloc_aligned(4, 3);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        arena.alloc_aligned(10, 8).unwrap();
        arena.alloc_aligned(10, 8).unwrap();
        arena.reset();
        assert_eq!((arena.used(), arena.previous_offset()), (0, 0));
        arena.reset();
        assert_eq!((arena.used(), arena.previous_offset()), (0, 0));
    }

    #[test]
    fn reset_allows_address_reuse() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        let first = arena.alloc_aligned(24, 8).unwrap();
        let first_addr = arena.address(first);
        arena.reset();
        let again = arena.alloc_aligned(24, 8).unwrap();
        assert_eq!(arena.address(again), first_addr);
    }

    #[test]
    fn reset_does_not_zero_but_next_alloc_does() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        let a = arena.alloc_aligned(8, 8).unwrap();
        arena.bytes_mut(a).fill(7);
        arena.reset();
        // Stale handle still resolves to the old bytes.
        assert!(arena.bytes(a).iter().all(|&b| b == 7));
        let b = arena.alloc_aligned(8, 8).unwrap();
        assert!(arena.bytes(b).iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_and_reset_scrubs_used_region() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        let a = arena.alloc_aligned(20, 4).unwrap();
        arena.bytes_mut(a).fill(9);
        arena.zero_and_reset();
        assert_eq!(arena.used(), 0);
        assert!(arena.bytes(a).iter().all(|&b| b == 0));
    }

    #[test]
    fn deinit_scrubs_and_unbinds() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        let a = arena.alloc_aligned(16, 8).unwrap();
        arena.bytes_mut(a).fill(5);
        let returned = arena.deinit();
        assert_eq!(returned.len(), 64);
        assert!(returned[..16].iter().all(|&b| b == 0));
        assert_eq!(arena.capacity(), 0);
        assert_eq!(arena.used(), 0);
        assert!(!arena.is_bound());
        assert!(arena.alloc_aligned(1, 1).is_err());
    }

    #[test]
    fn init_rebinds_after_deinit() {
        let mut first = Block::<64>::filled(0);
        let mut second = Block::<128>::filled(0);
        let mut arena = Arena::new(&mut first.0);
        arena.alloc_aligned(32, 8).unwrap();
        let _ = arena.deinit();
        arena.init(&mut second.0);
        assert_eq!(arena.capacity(), 128);
        assert_eq!(arena.alloc_aligned(100, 8).unwrap().offset(), 0);
    }

    #[test]
    fn realloc_none_allocates() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        arena.alloc_aligned(4, 1).unwrap();
        let a = arena.realloc_aligned(None, 8, 8).unwrap();
        assert_eq!(a.offset(), 8);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn realloc_empty_handle_allocates() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        let empty = arena.alloc_aligned(0, 8).unwrap();
        let a = arena.realloc_aligned(Some(empty), 12, 8).unwrap();
        assert_eq!(a.len(), 12);
        assert_eq!(arena.used(), 12);
    }

    #[test]
    fn realloc_most_recent_grows_in_place() {
        let mut block = Block::<64>::filled(0xEE);
        let mut arena = Arena::new(&mut block.0);
        let a = arena.alloc_aligned(10, 8).unwrap();
        arena.bytes_mut(a).fill(0xAA);
        let b = arena.realloc_aligned(Some(a), 20, 8).unwrap();
        assert_eq!(b.offset(), a.offset());
        assert_eq!(b.len(), 20);
        assert_eq!(arena.used(), 20);
        let bytes = arena.bytes(b);
        assert!(bytes[..10].iter().all(|&v| v == 0xAA));
        assert!(bytes[10..].iter().all(|&v| v == 0));
    }

    #[test]
    fn realloc_most_recent_shrinks_in_place() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        arena.alloc_aligned(8, 8).unwrap();
        let a = arena.alloc_aligned(24, 8).unwrap();
        let b = arena.realloc_aligned(Some(a), 4, 8).unwrap();
        assert_eq!(b.offset(), 8);
        assert_eq!(arena.used(), 12);
        // Freed tail is reusable.
        assert_eq!(arena.alloc_aligned(4, 4).unwrap().offset(), 12);
    }

    #[test]
    fn realloc_in_place_checks_capacity() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        arena.alloc_aligned(32, 8).unwrap();
        let a = arena.alloc_aligned(16, 8).unwrap();
        let err = arena.realloc_aligned(Some(a), 40, 8).unwrap_err();
        assert_eq!(
            err,
            ArenaError::CapacityExceeded {
                requested: 40,
                offset: Some(32),
                capacity: 64,
            }
        );
        assert_eq!(arena.used(), 48);
        // Growing exactly to the end is fine.
        let b = arena.realloc_aligned(Some(a), 32, 8).unwrap();
        assert_eq!(b.offset(), 32);
        assert_eq!(arena.remaining(), 0);
    }

    #[test]
    fn realloc_older_allocation_moves_and_copies() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        let a = arena.alloc_aligned(8, 8).unwrap();
        arena.bytes_mut(a).copy_from_slice(b"abcdefgh");
        let _b = arena.alloc_aligned(8, 8).unwrap();
        let c = arena.realloc_aligned(Some(a), 16, 8).unwrap();
        assert_ne!(c.offset(), a.offset());
        assert_eq!(c.offset(), 16);
        assert_eq!(&arena.bytes(c)[..8], b"abcdefgh");
        assert!(arena.bytes(c)[8..].iter().all(|&v| v == 0));
    }

    #[test]
    fn realloc_older_allocation_shrink_copies_prefix() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        let a = arena.alloc_aligned(8, 8).unwrap();
        arena.bytes_mut(a).copy_from_slice(b"abcdefgh");
        let _b = arena.alloc_aligned(8, 8).unwrap();
        let c = arena.realloc_aligned(Some(a), 3, 8).unwrap();
        assert_eq!(arena.bytes(c), b"abc");
    }

    #[test]
    fn realloc_move_propagates_capacity_error() {
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        let a = arena.alloc_aligned(16, 8).unwrap();
        let _b = arena.alloc_aligned(40, 8).unwrap();
        let err = arena.realloc_aligned(Some(a), 16, 8).unwrap_err();
        assert!(matches!(err, ArenaError::CapacityExceeded { .. }));
        assert_eq!(arena.used(), 56);
        assert_eq!(arena.previous_offset(), 16);
    }

    #[test]
    fn realloc_foreign_handle_is_invalid() {
        let mut big = Block::<256>::filled(0);
        let foreign = {
            let mut other = Arena::new(&mut big.0);
            other.alloc_aligned(128, 8).unwrap();
            other.alloc_aligned(8, 8).unwrap()
        };
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        arena.alloc_aligned(8, 8).unwrap();
        let err = arena.realloc_aligned(Some(foreign), 16, 8).unwrap_err();
        assert_eq!(
            err,
            ArenaError::InvalidAllocation {
                offset: 128,
                len: 8,
                capacity: 64,
            }
        );
        assert_eq!(arena.used(), 8);
    }

    #[test]
    fn realloc_handle_straddling_end_is_invalid() {
        let mut big = Block::<256>::filled(0);
        let straddling = {
            let mut other = Arena::new(&mut big.0);
            other.alloc_aligned(56, 8).unwrap();
            other.alloc_aligned(16, 8).unwrap()
        };
        let mut block = Block::<64>::filled(0);
        let mut arena = Arena::new(&mut block.0);
        let err = arena.realloc_aligned(Some(straddling), 4, 8).unwrap_err();
        assert!(matches!(err, ArenaError::InvalidAllocation { .. }));
    }

    #[test]
    fn get_returns_none_out_of_range() {
        let mut big = Block::<256>::filled(0);
        let far = Arena::new(&mut big.0).alloc_aligned(200, 1).unwrap();
        let mut block = Block::<64>::filled(0);
        let arena = Arena::new(&mut block.0);
        assert!(arena.get(far).is_none());
    }

    #[test]
    fn default_arena_is_unbound() {
        let mut arena = Arena::default();
        assert!(!arena.is_bound());
        assert_eq!(arena.capacity(), 0);
        assert!(arena.alloc_aligned(1, 1).is_err());
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn alloc_addresses_aligned_and_bounded(
                ops in proptest::collection::vec((0usize..96, 0u32..7), 1..40),
            ) {
                let mut block = Block::<512>::filled(0xCC);
                let mut arena = Arena::new(&mut block.0);
                for (size, shift) in ops {
                    let alignment = 1usize << shift;
                    let before = (arena.used(), arena.previous_offset());
                    match arena.alloc_aligned(size, alignment) {
                        Ok(slice) => {
                            prop_assert_eq!(arena.address(slice) % alignment, 0);
                            prop_assert!(slice.offset() + size <= arena.capacity());
                            prop_assert!(arena.bytes(slice).iter().all(|&b| b == 0));
                        }
                        Err(_) => {
                            prop_assert_eq!((arena.used(), arena.previous_offset()), before);
                        }
                    }
                    prop_assert!(arena.previous_offset() <= arena.used());
                    prop_assert!(arena.used() <= arena.capacity());
                }
            }

            #[test]
            fn realloc_preserves_prefix(
                first in 1usize..32,
                filler in 1usize..32,
                new_size in 0usize..64,
            ) {
                let mut block = Block::<256>::filled(0);
                let mut arena = Arena::new(&mut block.0);
                let a = arena.alloc_aligned(first, 8).unwrap();
                for (i, b) in arena.bytes_mut(a).iter_mut().enumerate() {
                    *b = i as u8 + 1;
                }
                let _ = arena.alloc_aligned(filler, 8).unwrap();
                let moved = arena.realloc_aligned(Some(a), new_size, 8).unwrap();
                prop_assert_ne!(moved.offset(), a.offset());
                let keep = first.min(new_size);
                let expected: Vec<u8> = (0..keep).map(|i| i as u8 + 1).collect();
                prop_assert_eq!(&arena.bytes(moved)[..keep], &expected[..]);
            }
        }
    }
}
