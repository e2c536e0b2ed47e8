//! Bit-reversal permutation.
//!
//! The level-by-level engines (and the GPU kernels they model) read their
//! input in bit-reversed order and leave that reordering to the host. This
//! module performs it out of place.

use alloc::vec::Vec;

use crate::math::{is_power_of_two, power_of_two_exponent};

/// Reverse the 32 bits of `a`.
///
/// Knuth's swap network: rotate by 15, then three masked exchanges.
#[inline]
pub const fn reverse_bits(a: u32) -> u32 {
    let mut a = a.rotate_left(15);
    let mut t = (a ^ (a >> 10)) & 0x003f_801f;
    a = (t.wrapping_add(t << 10)) ^ a;
    t = (a ^ (a >> 4)) & 0x0e03_8421;
    a = (t.wrapping_add(t << 4)) ^ a;
    t = (a ^ (a >> 2)) & 0x2248_8842;
    a = (t.wrapping_add(t << 2)) ^ a;
    a
}

/// Index that element `i` moves to in a sequence of `2^exponent` elements.
#[inline]
pub const fn reversed_index(i: usize, exponent: u32) -> usize {
    if exponent == 0 {
        return 0;
    }
    (reverse_bits(i as u32) >> (u32::BITS - exponent)) as usize
}

/// Return a copy of `v` where the element at index `i` sits at
/// `reversed_index(i, log2(len))`.
///
/// Applying the permutation twice yields the original order.
///
/// # Panics
/// Panics if `v.len()` is not a power of two or exceeds `2^32`.
pub fn bit_reverse_permutation<T: Copy>(v: &[T]) -> Vec<T> {
    let n = v.len();
    assert!(
        is_power_of_two(n),
        "bit-reversal needs a power-of-two length, got {}",
        n
    );
    let e = power_of_two_exponent(n);
    assert!(e <= u32::BITS, "length {} exceeds 32-bit indices", n);
    let mut res = v.to_vec();
    for (i, &x) in v.iter().enumerate() {
        res[reversed_index(i, e)] = x;
    }
    res
}
