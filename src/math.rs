//! Integer helpers shared by the permutation, cache and engine modules.

use crate::num::Float;

/// Returns `true` when `n` is a non-zero power of two.
#[inline]
pub const fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// Base-2 exponent of `v`, i.e. the index of its highest set bit.
///
/// Returns `0` for both `0` and `1`; callers check [`is_power_of_two`] first
/// when the distinction matters.
#[inline]
pub const fn power_of_two_exponent(v: usize) -> u32 {
    if v == 0 {
        0
    } else {
        usize::BITS - 1 - v.leading_zeros()
    }
}

/// Returns `true` when `a` is an integer multiple of `b`.
///
/// # Panics
/// Panics if `b` is zero.
#[inline]
pub const fn is_multiple(a: usize, b: usize) -> bool {
    (a / b) * b == a
}

/// Worst-case relative error bound for a size-`n` radix-2 transform.
///
/// Rounding errors grow with the number of butterfly levels, so the bound is
/// `log2(n)` machine epsilons.
pub fn fft_epsilon<T: Float>(n: usize) -> f64 {
    power_of_two_exponent(n) as f64 * T::epsilon().to_f64()
}
