//! Stockham auto-sort transform.
//!
//! Every level reads one buffer and writes the other, reordering as it goes,
//! so the input is consumed in natural order and no bit-reversal pass is
//! needed.

use alloc::vec;
use alloc::vec::Vec;

use super::{butterfly, oriented, table_stride, FftDirection};
use crate::num::{Complex, Float};

/// Output slot for butterfly `index` at a level of span `n1` and radix `n2`.
#[inline(always)]
pub fn expand(index: usize, n1: usize, n2: usize) -> usize {
    (index / n1) * n1 * n2 + index % n1
}

/// Transform natural-order `input` using `roots`.
///
/// `max_level` has the same meaning as for the iterative engine, including
/// the inclusive cap (`Some(4)` runs spans 1, 2 and 4), but since the data
/// moves between buffers, partial results are laid out differently.
///
/// # Panics
/// Panics if the length is not a power of two or the table does not serve it.
pub fn transform<T: Float>(
    direction: FftDirection,
    input: &[Complex<T>],
    roots: &[Complex<T>],
    max_level: Option<usize>,
) -> Vec<Complex<T>> {
    let n = input.len();
    let stride = table_stride(n, roots.len());
    let half = n / 2;
    let mut current = oriented(direction, input);
    let mut next = vec![Complex::zero(); n];
    let last = max_level.map_or(n, |m| m.min(n));

    let mut span = 1;
    while span < n && span <= last {
        let root_step = (n / (2 * span)) * stride;
        for k in 0..half {
            let w = roots[(k % span) * root_step];
            let (lo, hi) = butterfly(current[k], current[k + half], w);
            let d = expand(k, span, 2);
            next[d] = lo;
            next[d + span] = hi;
        }
        core::mem::swap(&mut current, &mut next);
        span <<= 1;
    }
    current
}
