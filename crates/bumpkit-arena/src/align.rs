//! Power-of-two alignment arithmetic.
//!
//! Alignment is always a power of two, so the remainder is taken with a mask
//! (`value & (alignment - 1)`) instead of a division.

/// Round `value` up to the next multiple of `alignment`.
///
/// Already-aligned values are returned unchanged. Returns `None` if rounding
/// up would overflow `usize`.
///
/// # Panics
///
/// Panics if `alignment` is not a power of two.
pub fn align_forward(value: usize, alignment: usize) -> Option<usize> {
    assert!(
        alignment.is_power_of_two(),
        "alignment must be a power of two, got {alignment}",
    );
    let rem = value & (alignment - 1);
    if rem == 0 {
        Some(value)
    } else {
        value.checked_add(alignment - rem)
    }
}

/// Whether `value` is a multiple of the power-of-two `alignment`.
pub fn is_aligned(value: usize, alignment: usize) -> bool {
    debug_assert!(alignment.is_power_of_two());
    value & (alignment - 1) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_values_unchanged() {
        assert_eq!(align_forward(0, 8), Some(0));
        assert_eq!(align_forward(16, 8), Some(16));
        assert_eq!(align_forward(17, 1), Some(17));
    }

    #[test]
    fn rounds_up_to_next_multiple() {
        assert_eq!(align_forward(1, 8), Some(8));
        assert_eq!(align_forward(10, 8), Some(16));
        assert_eq!(align_forward(15, 16), Some(16));
        assert_eq!(align_forward(65, 64), Some(128));
    }

    #[test]
    fn overflow_returns_none() {
        assert_eq!(align_forward(usize::MAX, 2), None);
        assert_eq!(align_forward(usize::MAX - 2, 8), None);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn non_power_of_two_panics() {
        let _ = align_forward(10, 6);
    }

    #[test]
    fn is_aligned_mask() {
        assert!(is_aligned(32, 16));
        assert!(!is_aligned(33, 16));
        assert!(is_aligned(7, 1));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn matches_modulo_formula(value in 0usize..1 << 40, shift in 0u32..16) {
                let alignment = 1usize << shift;
                let expected = value + (alignment - value % alignment) % alignment;
                let aligned = align_forward(value, alignment).unwrap();
                prop_assert_eq!(aligned, expected);
                prop_assert!(is_aligned(aligned, alignment));
                prop_assert!(aligned - value < alignment);
            }
        }
    }
}
